//! The capacity-bounded interaction journal.

use super::model::{JournalEntry, NewJournalEntry};
use super::store::EntryStore;
use crate::error::Result;
use chrono::Utc;
use std::cmp::Reverse;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Maximum number of entries the journal retains.
pub const JOURNAL_CAPACITY: usize = 50;

/// Append-only, capacity-bounded record of accepted suggestions.
///
/// Appends are durably stored through the entry store, then capacity is
/// enforced by evicting the oldest entries. Append and enforcement run under
/// a per-journal critical section so concurrent appends cannot overshoot the
/// cap or double-evict.
pub struct InteractionJournal {
    store: Arc<dyn EntryStore>,
    capacity: usize,
    append_lock: Mutex<()>,
}

impl InteractionJournal {
    /// Creates a journal over the given store with the standard capacity.
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            capacity: JOURNAL_CAPACITY,
            append_lock: Mutex::new(()),
        }
    }

    /// Appends an entry, assigning its id and timestamp, then enforces the
    /// capacity bound. Returns the stored entry.
    pub async fn append(&self, new: NewJournalEntry) -> Result<JournalEntry> {
        let _guard = self.append_lock.lock().await;

        let timestamp = Utc::now();
        let entry = JournalEntry {
            id: new_entry_id(timestamp.timestamp_millis()),
            text_before: new.text_before,
            text_after: new.text_after,
            action: new.action,
            persona_label: new.persona_label,
            stats_before: new.stats_before,
            stats_after: new.stats_after,
            timestamp,
        };
        self.store.put(&entry).await?;
        self.enforce_capacity().await?;

        Ok(entry)
    }

    /// Deletes the oldest entries until the capacity bound holds.
    async fn enforce_capacity(&self) -> Result<()> {
        let mut entries = self.store.get_all().await?;
        if entries.len() <= self.capacity {
            return Ok(());
        }

        // Oldest first; ids embed the creation millis, so the id tie-break
        // stays time-consistent.
        entries.sort_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));
        let excess = entries.len() - self.capacity;
        for entry in entries.into_iter().take(excess) {
            tracing::debug!(id = %entry.id, "evicting oldest journal entry");
            self.store.delete(&entry.id).await?;
        }

        Ok(())
    }

    /// All entries, most recent first.
    pub async fn list_all(&self) -> Result<Vec<JournalEntry>> {
        let mut entries = self.store.get_all().await?;
        entries.sort_by(|a, b| Reverse((a.timestamp, &a.id)).cmp(&Reverse((b.timestamp, &b.id))));
        Ok(entries)
    }

    /// Removes a single entry.
    pub async fn remove(&self, id: &str) -> Result<()> {
        self.store.delete(id).await
    }

    /// Removes every entry.
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await
    }
}

/// Time-based id with a random suffix to avoid collisions within the same
/// millisecond.
fn new_entry_id(millis: i64) -> String {
    format!("{}-{:04x}", millis, rand::random::<u16>())
}
