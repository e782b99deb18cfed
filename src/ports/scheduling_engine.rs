//! Scheduling engine port - pure calendar arithmetic behind a seam.
//!
//! The engine has no side effects; the trait exists so handlers can be
//! exercised with a fixed-date double, the way the production engine is
//! swapped for a fast one during manual testing.

use crate::domain::foundation::{ConfigurationError, Timestamp};

/// Port for due-date computation.
pub trait SchedulingEngine: Send + Sync {
    /// Computes the next due instant: `days_out` calendar days after
    /// `now` in the engine's local calendar, at `hour_of_day:00:00`.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` when the local calendar cannot represent the
    /// resulting wall-clock instant.
    fn next_due_date(
        &self,
        now: Timestamp,
        days_out: u32,
        hour_of_day: u32,
    ) -> Result<Timestamp, ConfigurationError>;

    /// Identical arithmetic applied to an existing due date; used for
    /// "remind me later" escalation.
    fn snooze_date(
        &self,
        existing_due: Timestamp,
        days_out: u32,
        hour_of_day: u32,
    ) -> Result<Timestamp, ConfigurationError>;
}
