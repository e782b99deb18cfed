//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the chore-reminder domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ConfigurationError, ValidationError};
pub use ids::{CycleId, NotificationRef, ReminderRef};
pub use timestamp::Timestamp;
