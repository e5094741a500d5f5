//! DynamoDB repository implementation.
//!
//! Implements [`QueueRepository`] from `waitline_core::storage` over a
//! single table keyed by `id` with the `StatusIndex` GSI.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use waitline_core::queue::{QueueEntry, QueueStatus};
use waitline_core::storage::{EntryChanges, QueueRepository, RepositoryError, Result};

use super::conversions::{entry_to_item, item_to_entry, update_expression};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_scan_error, map_update_item_error,
};

use crate::config::Config;

/// Name of the GSI keyed by status (HASH) and checkInTime (RANGE).
const STATUS_INDEX: &str = "StatusIndex";

/// Clamp a caller-supplied limit to what the Limit parameter accepts.
///
/// DynamoDB rejects negative limits, so an oversized usize must saturate
/// rather than wrap.
fn page_limit(limit: usize) -> i32 {
    i32::try_from(limit).unwrap_or(i32::MAX)
}

/// DynamoDB-backed waitlist repository.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain; an explicit endpoint URL
    /// in the config redirects the client at a local DynamoDB.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let client = Client::new(&sdk_config);

        Self::new(client, config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl QueueRepository for DynamoDbRepository {
    async fn put_entry(&self, entry: &QueueEntry) -> Result<()> {
        let item = entry_to_item(entry);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_entry(&self, id: Uuid) -> Result<Option<QueueEntry>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_entry(&item)?)),
            None => Ok(None),
        }
    }

    async fn query_by_status(&self, status: QueueStatus, limit: usize) -> Result<Vec<QueueEntry>> {
        // The index range key is checkInTime, so results come back already
        // sorted in check-in order.
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(STATUS_INDEX)
            .key_condition_expression("#status = :status")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(
                ":status",
                AttributeValue::S(status.as_str().to_string()),
            )
            .scan_index_forward(true)
            .limit(page_limit(limit))
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_entry).collect()
    }

    async fn scan_entries(&self, limit: usize) -> Result<Vec<QueueEntry>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .limit(page_limit(limit))
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_entry).collect()
    }

    async fn update_entry(&self, id: Uuid, changes: &EntryChanges) -> Result<QueueEntry> {
        let (expression, names, values) = update_expression(changes);

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .update_expression(expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .condition_expression("attribute_exists(id)")
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, id.to_string()))?;

        let item = result.attributes.ok_or_else(|| {
            RepositoryError::QueryFailed("UpdateItem returned no attributes".to_string())
        })?;

        item_to_entry(&item)
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        // No existence condition; deleting an absent id succeeds.
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
