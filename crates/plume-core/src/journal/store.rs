//! Storage collaborator trait for journal entries.
//!
//! The journal does not implement persistence mechanics; it delegates to an
//! asynchronous key-value store keyed by the entry id.

use super::model::JournalEntry;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract key-value store for journal entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Stores an entry, replacing any record with the same id.
    async fn put(&self, entry: &JournalEntry) -> Result<()>;

    /// Retrieves an entry by id; `Ok(None)` when absent.
    async fn get(&self, id: &str) -> Result<Option<JournalEntry>>;

    /// Retrieves all entries, in no particular order.
    async fn get_all(&self) -> Result<Vec<JournalEntry>>;

    /// Deletes an entry by id; deleting an absent id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Deletes all entries.
    async fn clear(&self) -> Result<()>;
}
