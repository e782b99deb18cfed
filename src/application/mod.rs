//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports. One handler per user-facing operation.

pub mod handlers;

pub use handlers::{
    AddCycleCommand, AddCycleError, AddCycleHandler, AddCycleResult, ChannelOutcome,
    DeleteCycleCommand, DeleteCycleError, DeleteCycleHandler, DeleteCycleResult,
    MarkCompleteCommand, MarkCompleteError, MarkCompleteHandler, MarkCompleteResult,
    SnoozeNotificationCommand, SnoozeNotificationError, SnoozeNotificationHandler,
    SnoozeNotificationResult, UpdateSettingsCommand, UpdateSettingsError, UpdateSettingsHandler,
    UpdateSettingsResult,
};
