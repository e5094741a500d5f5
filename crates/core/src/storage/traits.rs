use async_trait::async_trait;
use uuid::Uuid;

use crate::queue::{QueueEntry, QueueStatus};

use super::{EntryChanges, Result};

/// Repository for waitlist entry operations.
///
/// All operations act on single items by primary key; there are no
/// transactions and no optimistic concurrency control.
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Unconditionally upserts an entry by its id.
    async fn put_entry(&self, entry: &QueueEntry) -> Result<()>;

    /// Gets an entry by its id.
    async fn get_entry(&self, id: Uuid) -> Result<Option<QueueEntry>>;

    /// Returns entries with the given status, ordered by check-in time
    /// ascending, at most `limit` items.
    async fn query_by_status(&self, status: QueueStatus, limit: usize) -> Result<Vec<QueueEntry>>;

    /// Returns up to `limit` entries in no particular order. Completeness is
    /// not guaranteed once the table grows past `limit`.
    async fn scan_entries(&self, limit: usize) -> Result<Vec<QueueEntry>>;

    /// Partially updates an entry and returns the post-update item.
    ///
    /// Fails with [`RepositoryError::NotFound`] when the id does not exist.
    ///
    /// [`RepositoryError::NotFound`]: super::RepositoryError::NotFound
    async fn update_entry(&self, id: Uuid, changes: &EntryChanges) -> Result<QueueEntry>;

    /// Deletes an entry by its id. Deleting an absent id is not an error.
    async fn delete_entry(&self, id: Uuid) -> Result<()>;
}
