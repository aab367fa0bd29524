//! Configuration file storage.
//!
//! Loads and saves the TOML configuration through the atomic write
//! primitive, so a crash mid-save never corrupts the file.

use crate::atomic_write::write_atomic;
use plume_core::config::PlumeConfig;
use plume_core::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A handle to the assistant's TOML configuration file.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads the configuration.
    ///
    /// Returns `Ok(None)` when the file does not exist or is empty.
    pub async fn load(&self) -> Result<Option<PlumeConfig>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str(&content)?))
    }

    /// Loads the configuration, falling back to defaults.
    pub async fn load_or_default(&self) -> Result<PlumeConfig> {
        Ok(self.load().await?.unwrap_or_default())
    }

    /// Saves the configuration atomically.
    pub async fn save(&self, config: &PlumeConfig) -> Result<()> {
        let rendered = toml::to_string_pretty(config)?;
        write_atomic(&self.path, rendered.as_bytes()).await
    }
}
