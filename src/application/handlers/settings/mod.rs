//! Settings command handlers.

mod update_settings;

pub use update_settings::{
    Channel, UpdateSettingsCommand, UpdateSettingsError, UpdateSettingsHandler,
    UpdateSettingsResult,
};
