use std::env;

/// Application configuration loaded from environment variables, once at
/// process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table backing the waitlist (default:
    /// "restaurant-queue-system-dev")
    pub table_name: String,
    /// AWS region (default: "us-east-1")
    pub aws_region: String,
    /// Custom endpoint URL, for local DynamoDB. None targets AWS.
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - backing table name (default: "restaurant-queue-system-dev")
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - custom endpoint for local DynamoDB (optional)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("TABLE_NAME")
                .unwrap_or_else(|_| "restaurant-queue-system-dev".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
