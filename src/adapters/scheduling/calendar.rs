//! Calendar-based scheduling engine.
//!
//! Adds whole calendar days in a configured timezone and pins the result
//! to a wall-clock hour. DST makes this fallible: the target wall-clock
//! time may not exist (spring-forward gap) or may exist twice (fall-back
//! overlap). A nonexistent time is a [`ConfigurationError`]; an ambiguous
//! time resolves to the earlier instant.

use chrono::{Days, LocalResult, TimeZone, Utc};

use crate::domain::foundation::{ConfigurationError, Timestamp};
use crate::ports::SchedulingEngine;

/// Production scheduling engine over any timezone.
///
/// The zone is typically parsed from configuration
/// ([`SchedulingConfig`](crate::config::SchedulingConfig)); tests use
/// fixed offsets and named `chrono_tz` zones.
#[derive(Debug, Clone)]
pub struct CalendarScheduler<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> CalendarScheduler<Tz> {
    /// Creates a scheduler computing dates in the given timezone.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    fn due_at(
        &self,
        base: Timestamp,
        days_out: u32,
        hour_of_day: u32,
    ) -> Result<Timestamp, ConfigurationError> {
        if hour_of_day > 23 {
            return Err(ConfigurationError::InvalidHour { hour_of_day });
        }

        let local = base.as_datetime().with_timezone(&self.tz);
        let target_date = local
            .date_naive()
            .checked_add_days(Days::new(u64::from(days_out)))
            .ok_or(ConfigurationError::DateOverflow { days_out })?;

        // hour_of_day was range-checked above, so this can only fail for
        // a date the calendar cannot hold.
        let target = target_date
            .and_hms_opt(hour_of_day, 0, 0)
            .ok_or(ConfigurationError::InvalidHour { hour_of_day })?;

        match self.tz.from_local_datetime(&target) {
            LocalResult::Single(dt) => Ok(Timestamp::from_datetime(dt.with_timezone(&Utc))),
            LocalResult::Ambiguous(earlier, _later) => {
                Ok(Timestamp::from_datetime(earlier.with_timezone(&Utc)))
            }
            LocalResult::None => Err(ConfigurationError::NonexistentLocalTime {
                local_time: target,
            }),
        }
    }
}

impl CalendarScheduler<Utc> {
    /// Scheduler computing dates in UTC.
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl<Tz> SchedulingEngine for CalendarScheduler<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    fn next_due_date(
        &self,
        now: Timestamp,
        days_out: u32,
        hour_of_day: u32,
    ) -> Result<Timestamp, ConfigurationError> {
        self.due_at(now, days_out, hour_of_day)
    }

    fn snooze_date(
        &self,
        existing_due: Timestamp,
        days_out: u32,
        hour_of_day: u32,
    ) -> Result<Timestamp, ConfigurationError> {
        self.due_at(existing_due, days_out, hour_of_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn ts(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn adds_days_and_pins_hour_in_utc() {
        let scheduler = CalendarScheduler::utc();
        let now = ts("2024-11-23T09:30:45Z");

        let due = scheduler.next_due_date(now, 2, 17).unwrap();

        assert_eq!(due, ts("2024-11-25T17:00:00Z"));
    }

    #[test]
    fn computes_in_the_configured_offset() {
        // UTC+05:30 - the local date can differ from the UTC date.
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let scheduler = CalendarScheduler::new(offset);
        // 2024-11-23 23:30 UTC is already 2024-11-24 05:00 local.
        let now = ts("2024-11-23T23:30:00Z");

        let due = scheduler.next_due_date(now, 2, 17).unwrap();

        // Local 2024-11-26 17:00 (+05:30) == 11:30 UTC.
        assert_eq!(due, ts("2024-11-26T11:30:00Z"));
    }

    #[test]
    fn zero_days_out_pins_hour_on_same_day() {
        let scheduler = CalendarScheduler::utc();
        let now = ts("2024-11-23T09:30:00Z");

        let due = scheduler.next_due_date(now, 0, 6).unwrap();

        assert_eq!(due, ts("2024-11-23T06:00:00Z"));
    }

    #[test]
    fn snooze_applies_same_arithmetic_to_existing_due() {
        let scheduler = CalendarScheduler::utc();
        let existing_due = ts("2024-11-25T17:00:00Z");

        let snoozed = scheduler.snooze_date(existing_due, 1, 9).unwrap();

        assert_eq!(snoozed, ts("2024-11-26T09:00:00Z"));
    }

    #[test]
    fn rejects_hour_out_of_range() {
        let scheduler = CalendarScheduler::utc();
        let result = scheduler.next_due_date(Timestamp::from_unix_secs(0), 2, 24);

        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidHour { hour_of_day: 24 })
        ));
    }

    #[test]
    fn dst_gap_yields_configuration_error() {
        // US Eastern sprang forward 2024-03-10: 02:00-02:59 did not exist.
        let scheduler = CalendarScheduler::new(chrono_tz::America::New_York);
        let now = ts("2024-03-08T12:00:00Z");

        let result = scheduler.next_due_date(now, 2, 2);

        assert!(matches!(
            result,
            Err(ConfigurationError::NonexistentLocalTime { .. })
        ));
    }

    #[test]
    fn dst_overlap_resolves_to_earlier_instant() {
        // US Eastern fell back 2024-11-03: 01:00-01:59 happened twice.
        let scheduler = CalendarScheduler::new(chrono_tz::America::New_York);
        let now = ts("2024-11-01T12:00:00Z");

        let due = scheduler.next_due_date(now, 2, 1).unwrap();

        // The earlier 01:00 is still EDT (UTC-4).
        assert_eq!(due, ts("2024-11-03T05:00:00Z"));
    }

    proptest::proptest! {
        /// For any instant, the default parameters land exactly two
        /// calendar days out at 17:00.
        #[test]
        fn default_parameters_shift_two_days_to_five_pm(secs in 0i64..4_102_444_800) {
            use chrono::{Datelike, Timelike};

            let scheduler = CalendarScheduler::utc();
            let now = Timestamp::from_unix_secs(secs);

            let due = scheduler.next_due_date(now, 2, 17).unwrap();

            let due_dt = due.as_datetime();
            let expected_date = now
                .as_datetime()
                .date_naive()
                .checked_add_days(Days::new(2))
                .unwrap();
            proptest::prop_assert_eq!(due_dt.date_naive(), expected_date);
            proptest::prop_assert_eq!(due_dt.hour(), 17);
            proptest::prop_assert_eq!(due_dt.minute(), 0);
            proptest::prop_assert_eq!(due_dt.second(), 0);
        }

        /// Snoozing by one day at hour h lands one day out at h:00.
        #[test]
        fn snooze_shifts_one_day_to_requested_hour(
            secs in 0i64..4_102_444_800,
            hour in 0u32..24,
        ) {
            use chrono::{Datelike, Timelike};

            let scheduler = CalendarScheduler::utc();
            let existing_due = Timestamp::from_unix_secs(secs);

            let snoozed = scheduler.snooze_date(existing_due, 1, hour).unwrap();

            let dt = snoozed.as_datetime();
            let expected_date = existing_due
                .as_datetime()
                .date_naive()
                .checked_add_days(Days::new(1))
                .unwrap();
            proptest::prop_assert_eq!(dt.date_naive(), expected_date);
            proptest::prop_assert_eq!(dt.hour(), hour);
            proptest::prop_assert_eq!(dt.minute(), 0);
        }
    }

    #[test]
    fn dst_transition_preserves_wall_clock_hour() {
        // Scheduling across the spring-forward boundary still lands on
        // 17:00 local, even though the UTC offset changed.
        let scheduler = CalendarScheduler::new(chrono_tz::America::New_York);
        // 2024-03-08 10:00 EST (UTC-5).
        let now = ts("2024-03-08T15:00:00Z");

        let due = scheduler.next_due_date(now, 2, 17).unwrap();

        // 2024-03-10 17:00 EDT (UTC-4).
        assert_eq!(due, ts("2024-03-10T21:00:00Z"));
    }
}
