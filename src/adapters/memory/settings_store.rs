//! In-memory settings store adapter.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::settings::ChoreSettings;
use crate::ports::{SettingsStore, SettingsStoreError};

/// In-memory settings store, starting from defaults.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    settings: Arc<RwLock<ChoreSettings>>,
}

impl InMemorySettingsStore {
    /// Creates a store holding the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given settings.
    pub fn with_settings(settings: ChoreSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> Result<ChoreSettings, SettingsStoreError> {
        Ok(*self.settings.read().await)
    }

    async fn save(&self, settings: &ChoreSettings) -> Result<(), SettingsStoreError> {
        *self.settings.write().await = *settings;
        Ok(())
    }
}
