//! Storage configuration - where the persisted documents live.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Paths for the file-backed stores.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cycle snapshot and settings documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Path of the cycle snapshot document.
    pub fn cycles_path(&self) -> PathBuf {
        self.data_dir.join("cycles.json")
    }

    /// Path of the settings document.
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    /// Validates the configured paths.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir == Path::new("") {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}
