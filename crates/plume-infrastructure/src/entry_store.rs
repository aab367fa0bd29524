//! Directory-backed journal entry store.
//!
//! One JSON file per entry under a base directory:
//!
//! ```text
//! base_dir/
//! ├── 1722950400123-a3f1.json
//! └── 1722950400124-07c2.json
//! ```

use crate::atomic_write::write_atomic;
use async_trait::async_trait;
use plume_core::error::Result;
use plume_core::journal::{EntryStore, JournalEntry};
use std::path::{Path, PathBuf};
use tokio::fs;

/// JSON-file-per-entry implementation of the journal's store collaborator.
pub struct JsonDirEntryStore {
    base_dir: PathBuf,
}

impl JsonDirEntryStore {
    /// Creates a store rooted at `base_dir`, creating the directory.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    /// The directory entries are stored under.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl EntryStore for JsonDirEntryStore {
    async fn put(&self, entry: &JournalEntry) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entry)?;
        write_atomic(&self.entry_path(&entry.id), &bytes).await
    }

    async fn get(&self, id: &str) -> Result<Option<JournalEntry>> {
        match fs::read(self.entry_path(id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_all(&self) -> Result<Vec<JournalEntry>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.base_dir).await?;
        while let Some(dir_entry) = dir.next_entry().await? {
            let path = dir_entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path).await?;
            match serde_json::from_slice::<JournalEntry>(&bytes) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    // A corrupt record must not make the whole log unreadable.
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable journal entry");
                }
            }
        }
        Ok(entries)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn clear(&self) -> Result<()> {
        let mut dir = fs::read_dir(&self.base_dir).await?;
        while let Some(dir_entry) = dir.next_entry().await? {
            let path = dir_entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                fs::remove_file(&path).await?;
            }
        }
        Ok(())
    }
}
