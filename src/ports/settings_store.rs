//! Settings store port - persisted key/value chore configuration.

use async_trait::async_trait;

use crate::domain::settings::ChoreSettings;

/// Failure loading or saving settings.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsStoreError {
    #[error("failed to load settings: {0}")]
    Load(String),

    #[error("failed to save settings: {0}")]
    Save(String),
}

/// Port for the persisted settings backing store.
///
/// Handlers load on every call; the store is the only cache.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads the current settings, falling back to defaults for keys that
    /// have never been written.
    async fn load(&self) -> Result<ChoreSettings, SettingsStoreError>;

    /// Persists the full settings value.
    async fn save(&self, settings: &ChoreSettings) -> Result<(), SettingsStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn settings_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SettingsStore) {}
    }

    #[test]
    fn error_display_includes_cause() {
        let err = SettingsStoreError::Load("corrupt file".to_string());
        assert!(err.to_string().contains("corrupt file"));
    }
}
