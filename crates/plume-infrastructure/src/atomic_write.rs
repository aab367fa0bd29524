//! Atomic file writes.
//!
//! Updates are all-or-nothing: content goes to a temporary file in the same
//! directory, is fsynced, then renamed over the destination. A crash leaves
//! either the old file or the new one, never a torn write.

use plume_core::error::{PlumeError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Writes `bytes` to `path` atomically, creating parent directories.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).await?;
    }

    let tmp_path = temp_path(path)?;
    let mut tmp_file = fs::File::create(&tmp_path).await?;
    tmp_file.write_all(bytes).await?;
    tmp_file.sync_all().await?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).await?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| PlumeError::io("path has no parent directory"))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| PlumeError::io("path has no file name"))?;
    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}
