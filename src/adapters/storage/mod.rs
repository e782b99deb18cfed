//! File-backed storage adapters and the snapshot migration pipeline.

mod file_cycle_store;
mod file_settings_store;
mod migration;
mod schema;

pub use file_cycle_store::FileCycleStore;
pub use file_settings_store::FileSettingsStore;
pub use migration::{
    AddRecordIdentifiers, MigrationError, MigrationPipeline, MigrationStage, StringifyIdentifiers,
};
pub use schema::{CycleRecord, StoreSnapshot, CURRENT_SCHEMA_VERSION};
