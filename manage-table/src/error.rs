//! Error types for table management operations.

use thiserror::Error;

/// Result type alias for table management.
pub type Result<T> = std::result::Result<T, ManageTableError>;

/// Errors that can occur while provisioning the waitlist table.
#[derive(Error, Debug)]
pub enum ManageTableError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Access denied: {0}\nCheck your AWS credentials and IAM permissions")]
    AccessDenied(String),

    #[error("Operation cancelled by user")]
    UserCancelled,
}

/// Classify an SDK failure, surfacing credential problems distinctly.
pub fn classify_sdk_error(err: impl std::fmt::Display) -> ManageTableError {
    let message = err.to_string();
    if message.contains("AccessDenied") || message.contains("UnrecognizedClient") {
        ManageTableError::AccessDenied(message)
    } else {
        ManageTableError::AwsSdk(message)
    }
}
