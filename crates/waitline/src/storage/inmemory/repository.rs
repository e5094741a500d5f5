//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use waitline_core::queue::{QueueEntry, QueueStatus};
use waitline_core::storage::{EntryChanges, QueueRepository, RepositoryError, Result};

/// In-memory storage backend for tests and local development.
///
/// A HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access. Data is
/// not persisted and is lost when the repository is dropped. The `ttl`
/// attribute is stored but never swept.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<RwLock<HashMap<Uuid, QueueEntry>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueRepository for InMemoryRepository {
    async fn put_entry(&self, entry: &QueueEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn get_entry(&self, id: Uuid) -> Result<Option<QueueEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).cloned())
    }

    async fn query_by_status(&self, status: QueueStatus, limit: usize) -> Result<Vec<QueueEntry>> {
        let entries = self.entries.read().await;
        let mut matches: Vec<QueueEntry> = entries
            .values()
            .filter(|e| e.status == status)
            .cloned()
            .collect();
        matches.sort_by_key(|e| e.check_in_time);
        matches.truncate(limit);
        Ok(matches)
    }

    async fn scan_entries(&self, limit: usize) -> Result<Vec<QueueEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().take(limit).cloned().collect())
    }

    async fn update_entry(&self, id: Uuid, changes: &EntryChanges) -> Result<QueueEntry> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;
        changes.apply_to(entry);
        Ok(entry.clone())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(&id);
        Ok(())
    }
}
