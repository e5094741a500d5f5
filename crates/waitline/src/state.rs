//! Application state with repository-based storage.
//!
//! The state holds a repository trait object that is constructed once at
//! startup and cloned cheaply into every request handler.

use std::sync::Arc;

use waitline_core::storage::QueueRepository;

use crate::config::Config;
use crate::storage::{DynamoDbRepository, InMemoryRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Waitlist repository.
    pub queue_repo: Arc<dyn QueueRepository>,
}

impl AppState {
    /// Creates an AppState over the given repository.
    pub fn new(queue_repo: Arc<dyn QueueRepository>) -> Self {
        Self { queue_repo }
    }

    /// Creates an AppState backed by DynamoDB.
    pub async fn dynamodb(config: &Config) -> Result<Self, anyhow::Error> {
        let repo = DynamoDbRepository::from_config(config).await;
        Ok(Self::new(Arc::new(repo)))
    }

    /// Creates an AppState backed by in-memory storage.
    ///
    /// Useful for tests and local development without external dependencies.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }
}
