//! AWS SDK client setup.

use aws_sdk_dynamodb::types::TableStatus;
use aws_sdk_dynamodb::Client;

use crate::error::{classify_sdk_error, Result};

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl AwsConfig {
    /// Builds a config for the given region, honoring `AWS_ENDPOINT_URL`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: region.into(),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({url})"),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Result<Client> {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Ok(Client::new(&sdk_config))
}

/// Fetches the current table status, or None if the table doesn't exist.
pub async fn get_table_status(client: &Client, table_name: &str) -> Result<Option<TableStatus>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => Ok(response.table().and_then(|t| t.table_status().cloned())),
        Err(err) => {
            let message = err.to_string();
            if message.contains("ResourceNotFoundException") || message.contains("not found") {
                Ok(None)
            } else {
                Err(classify_sdk_error(err))
            }
        }
    }
}
