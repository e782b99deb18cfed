//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod cycle;
pub mod settings;

pub use cycle::{
    // Handlers
    AddCycleHandler, DeleteCycleHandler, MarkCompleteHandler, SnoozeNotificationHandler,
    // Commands and Results
    AddCycleCommand, AddCycleError, AddCycleResult,
    DeleteCycleCommand, DeleteCycleError, DeleteCycleResult,
    MarkCompleteCommand, MarkCompleteError, MarkCompleteResult,
    SnoozeNotificationCommand, SnoozeNotificationError, SnoozeNotificationResult,
    // Shared types
    ChannelOutcome,
};
pub use settings::{
    Channel, UpdateSettingsCommand, UpdateSettingsError, UpdateSettingsHandler,
    UpdateSettingsResult,
};
