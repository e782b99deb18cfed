//! CycleStatus - derived lifecycle classification of a chore cycle.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Seconds after the scheduled instant during which a cycle counts as
/// merely due rather than overdue.
pub const DUE_GRACE_SECS: i64 = 3600;

/// Derived status of a cycle at a given moment. Never stored; always
/// recomputed from `scheduled_at` and `completed_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Scheduled,
    Due,
    Overdue,
    Completed,
}

impl CycleStatus {
    /// Classifies a cycle relative to `now`.
    ///
    /// A set `completed_at` wins regardless of the other fields. Otherwise
    /// the cycle is `Scheduled` before the due instant, `Due` for the first
    /// hour after it, and `Overdue` from then on.
    pub fn classify(
        now: Timestamp,
        scheduled_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        if completed_at.is_some() {
            return CycleStatus::Completed;
        }

        let elapsed = now.duration_since(&scheduled_at);
        if elapsed < Duration::zero() {
            CycleStatus::Scheduled
        } else if elapsed < Duration::seconds(DUE_GRACE_SECS) {
            CycleStatus::Due
        } else {
            CycleStatus::Overdue
        }
    }

    /// Returns true if the chore still needs doing.
    pub fn needs_attention(&self) -> bool {
        matches!(self, CycleStatus::Due | CycleStatus::Overdue)
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleStatus::Scheduled => "Scheduled",
            CycleStatus::Due => "Due",
            CycleStatus::Overdue => "Overdue",
            CycleStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    fn ts(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn scheduled_before_due_instant() {
        let scheduled_at = ts("2024-11-25T17:00:00Z");
        let now = scheduled_at.plus_secs(-48 * 3600);
        assert_eq!(
            CycleStatus::classify(now, scheduled_at, None),
            CycleStatus::Scheduled
        );
    }

    #[test]
    fn due_at_exact_scheduled_instant() {
        let scheduled_at = ts("2024-11-25T17:00:00Z");
        assert_eq!(
            CycleStatus::classify(scheduled_at, scheduled_at, None),
            CycleStatus::Due
        );
    }

    #[test]
    fn due_within_grace_window() {
        let scheduled_at = ts("2024-11-25T17:00:00Z");
        let now = scheduled_at.plus_secs(300);
        assert_eq!(
            CycleStatus::classify(now, scheduled_at, None),
            CycleStatus::Due
        );
    }

    #[test]
    fn overdue_at_grace_window_boundary() {
        let scheduled_at = ts("2024-11-25T17:00:00Z");
        let now = scheduled_at.plus_secs(3600);
        assert_eq!(
            CycleStatus::classify(now, scheduled_at, None),
            CycleStatus::Overdue
        );
    }

    #[test]
    fn completed_wins_regardless_of_dates() {
        let scheduled_at = ts("2024-11-25T17:00:00Z");
        let completed_at = Some(scheduled_at.plus_secs(-60));
        let now = scheduled_at.plus_secs(7200);
        assert_eq!(
            CycleStatus::classify(now, scheduled_at, completed_at),
            CycleStatus::Completed
        );
    }

    #[test]
    fn needs_attention_only_when_due_or_overdue() {
        assert!(!CycleStatus::Scheduled.needs_attention());
        assert!(CycleStatus::Due.needs_attention());
        assert!(CycleStatus::Overdue.needs_attention());
        assert!(!CycleStatus::Completed.needs_attention());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&CycleStatus::Overdue).unwrap(),
            "\"overdue\""
        );
    }

    proptest! {
        /// The three non-completed statuses partition the timeline exactly.
        #[test]
        fn classification_partitions_the_timeline(offset_secs in -200_000i64..200_000) {
            let scheduled_at = Timestamp::from_unix_secs(1_700_000_000);
            let now = scheduled_at.plus_secs(offset_secs);

            let status = CycleStatus::classify(now, scheduled_at, None);
            let expected = if offset_secs < 0 {
                CycleStatus::Scheduled
            } else if offset_secs < DUE_GRACE_SECS {
                CycleStatus::Due
            } else {
                CycleStatus::Overdue
            };
            prop_assert_eq!(status, expected);
        }

        /// A set completion date classifies as Completed for any clock value.
        #[test]
        fn completed_at_dominates(offset_secs in -200_000i64..200_000) {
            let scheduled_at = Timestamp::from_unix_secs(1_700_000_000);
            let now = scheduled_at.plus_secs(offset_secs);

            let status = CycleStatus::classify(now, scheduled_at, Some(now));
            prop_assert_eq!(status, CycleStatus::Completed);
        }
    }
}
