//! Table provisioning operations.

use std::time::Duration;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection,
    ProjectionType, ScalarAttributeType, TableStatus, TimeToLiveSpecification,
};
use aws_sdk_dynamodb::Client;

use crate::client::get_table_status;
use crate::error::{classify_sdk_error, ManageTableError, Result};
use crate::prelude::*;

/// GSI serving status-filtered list queries, sorted by check-in time.
const STATUS_INDEX: &str = "StatusIndex";

/// Item attribute holding the expiry epoch.
const TTL_ATTRIBUTE: &str = "ttl";

const WAIT_ATTEMPTS: u32 = 30;
const WAIT_DELAY: Duration = Duration::from_secs(10);

/// Outcome of a create or delete request.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The request changed something.
    Applied,
    /// The table was already in the desired state.
    AlreadyDone,
}

/// Create the waitlist table with the StatusIndex GSI.
///
/// On-demand billing; an already existing table is success.
pub async fn create_table(client: &Client, table_name: &str) -> Result<Outcome> {
    let attribute_definitions = vec![
        string_attribute("id")?,
        string_attribute("status")?,
        string_attribute("checkInTime")?,
    ];

    let status_index = GlobalSecondaryIndex::builder()
        .index_name(STATUS_INDEX)
        .key_schema(key_element("status", KeyType::Hash)?)
        .key_schema(key_element("checkInTime", KeyType::Range)?)
        .projection(
            Projection::builder()
                .projection_type(ProjectionType::All)
                .build(),
        )
        .build()
        .map_err(|e| ManageTableError::AwsSdk(e.to_string()))?;

    let result = client
        .create_table()
        .table_name(table_name)
        .key_schema(key_element("id", KeyType::Hash)?)
        .set_attribute_definitions(Some(attribute_definitions))
        .global_secondary_indexes(status_index)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match result {
        Ok(_) => Ok(Outcome::Applied),
        Err(err) => {
            if matches!(
                err.as_service_error(),
                Some(CreateTableError::ResourceInUseException(_))
            ) {
                return Ok(Outcome::AlreadyDone);
            }
            Err(classify_sdk_error(DisplayErrorContext(&err)))
        }
    }
}

/// Delete the waitlist table. An absent table is success.
pub async fn delete_table(client: &Client, table_name: &str) -> Result<Outcome> {
    let result = client.delete_table().table_name(table_name).send().await;

    match result {
        Ok(_) => Ok(Outcome::Applied),
        Err(err) => {
            if matches!(
                err.as_service_error(),
                Some(DeleteTableError::ResourceNotFoundException(_))
            ) {
                return Ok(Outcome::AlreadyDone);
            }
            Err(classify_sdk_error(DisplayErrorContext(&err)))
        }
    }
}

/// Poll until the table reaches ACTIVE.
///
/// Gives up after the attempt budget; a timeout is reported as a warning by
/// the caller, not a failure, since the table usually finishes on its own.
pub async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<bool> {
    for _ in 0..WAIT_ATTEMPTS {
        if get_table_status(client, table_name).await? == Some(TableStatus::Active) {
            return Ok(true);
        }
        tokio::time::sleep(WAIT_DELAY).await;
    }
    Ok(false)
}

/// Poll until the table is gone.
pub async fn wait_for_table_removed(client: &Client, table_name: &str) -> Result<bool> {
    for _ in 0..WAIT_ATTEMPTS {
        if get_table_status(client, table_name).await?.is_none() {
            return Ok(true);
        }
        tokio::time::sleep(WAIT_DELAY).await;
    }
    Ok(false)
}

/// Enable TTL expiry on the `ttl` attribute.
///
/// Best effort: local DynamoDB builds reject this call, so a failure is a
/// warning rather than a provisioning error.
pub async fn enable_ttl(client: &Client, table_name: &str) {
    let spec = TimeToLiveSpecification::builder()
        .enabled(true)
        .attribute_name(TTL_ATTRIBUTE)
        .build();

    let spec = match spec {
        Ok(spec) => spec,
        Err(err) => {
            aprintln!("{} {}", p_y("Warning: could not enable TTL:"), err);
            return;
        }
    };

    if let Err(err) = client
        .update_time_to_live()
        .table_name(table_name)
        .time_to_live_specification(spec)
        .send()
        .await
    {
        aprintln!(
            "{} {}",
            p_y("Warning: could not enable TTL:"),
            DisplayErrorContext(&err)
        );
    }
}

fn string_attribute(name: &str) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| ManageTableError::AwsSdk(e.to_string()))
}

fn key_element(name: &str, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()
        .map_err(|e| ManageTableError::AwsSdk(e.to_string()))
}
