use thiserror::Error;

use super::types::QueueStatus;

/// Errors that can occur when validating queue requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("partySize must be a positive integer")]
    InvalidPartySize,
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: QueueStatus, to: QueueStatus },
    #[error("No updatable fields in request body")]
    EmptyUpdate,
}
