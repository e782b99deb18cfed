//! Error types for the domain layer.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }
}

/// Scheduling parameters could not produce a valid instant.
///
/// Returned instead of panicking when the local calendar cannot represent
/// the requested wall-clock time (for example the hour skipped by a DST
/// transition). Callers surface this to the user; the stored record set is
/// never touched with a substituted date.
#[derive(Debug, Clone, Error)]
pub enum ConfigurationError {
    #[error("hour_of_day must be between 0 and 23, got {hour_of_day}")]
    InvalidHour { hour_of_day: u32 },

    #[error("local time {local_time} does not exist in the target calendar")]
    NonexistentLocalTime { local_time: NaiveDateTime },

    #[error("date arithmetic overflowed adding {days_out} days")]
    DateOverflow { days_out: u32 },
}
