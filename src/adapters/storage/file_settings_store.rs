//! File-backed settings store adapter.
//!
//! One JSON document under the external key names (`daysOut`, `hourOfDay`,
//! ...). A missing file means defaults; unknown keys in an existing file
//! fall back per-field.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::domain::settings::ChoreSettings;
use crate::ports::{SettingsStore, SettingsStoreError};

/// File-backed settings store.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store reading and writing the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<ChoreSettings, SettingsStoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ChoreSettings::default());
            }
            Err(e) => return Err(SettingsStoreError::Load(e.to_string())),
        };

        serde_json::from_str(&contents).map_err(|e| SettingsStoreError::Load(e.to_string()))
    }

    async fn save(&self, settings: &ChoreSettings) -> Result<(), SettingsStoreError> {
        let contents = serde_json::to_string_pretty(settings)
            .map_err(|e| SettingsStoreError::Save(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SettingsStoreError::Save(e.to_string()))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)
            .await
            .map_err(|e| SettingsStoreError::Save(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| SettingsStoreError::Save(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));

        assert_eq!(store.load().await.unwrap(), ChoreSettings::default());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));
        let settings = ChoreSettings {
            days_out: 3,
            hour_of_day: 8,
            notifications_enabled: true,
            ..ChoreSettings::default()
        };

        store.save(&settings).await.unwrap();

        assert_eq!(store.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn file_uses_external_key_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::new(&path);

        store.save(&ChoreSettings::default()).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["daysOut"], 2);
        assert_eq!(raw["hourOfDay"], 17);
    }

    #[tokio::test]
    async fn partial_file_falls_back_per_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{\"remindersEnabled\": true}").unwrap();

        let settings = FileSettingsStore::new(&path).load().await.unwrap();

        assert!(settings.reminders_enabled);
        assert_eq!(settings.days_out, 2);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileSettingsStore::new(&path).load().await;

        assert!(matches!(result, Err(SettingsStoreError::Load(_))));
    }
}
