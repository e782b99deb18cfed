//! ChoreSettings - user-tunable scheduling and channel configuration.
//!
//! Persisted through the [`SettingsStore`](crate::ports::SettingsStore)
//! port under the external key names (`daysOut`, `hourOfDay`, ...). The
//! handlers reload settings on every call; nothing above the store caches
//! them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Process-wide chore configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoreSettings {
    /// Calendar days between completing the chore and the next due date.
    pub days_out: u32,
    /// Wall-clock hour (0-23) the chore comes due.
    pub hour_of_day: u32,
    /// Whether completing a cycle schedules its successor.
    pub auto_schedule_enabled: bool,
    /// Whether new cycles get a timed notification.
    pub notifications_enabled: bool,
    /// Whether new cycles get a reminder-list entry.
    pub reminders_enabled: bool,
}

impl Default for ChoreSettings {
    fn default() -> Self {
        Self {
            days_out: 2,
            hour_of_day: 17,
            auto_schedule_enabled: true,
            notifications_enabled: false,
            reminders_enabled: false,
        }
    }
}

impl ChoreSettings {
    /// Checks field ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.hour_of_day > 23 {
            return Err(ValidationError::out_of_range(
                "hour_of_day",
                0,
                23,
                self.hour_of_day as i64,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = ChoreSettings::default();
        assert_eq!(settings.days_out, 2);
        assert_eq!(settings.hour_of_day, 17);
        assert!(settings.auto_schedule_enabled);
        assert!(!settings.notifications_enabled);
        assert!(!settings.reminders_enabled);
    }

    #[test]
    fn validate_accepts_hour_range() {
        for hour in 0..=23 {
            let settings = ChoreSettings {
                hour_of_day: hour,
                ..ChoreSettings::default()
            };
            assert!(settings.validate().is_ok());
        }
    }

    #[test]
    fn validate_rejects_hour_out_of_range() {
        let settings = ChoreSettings {
            hour_of_day: 24,
            ..ChoreSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn serializes_under_external_key_names() {
        let json = serde_json::to_value(ChoreSettings::default()).unwrap();
        assert_eq!(json["daysOut"], 2);
        assert_eq!(json["hourOfDay"], 17);
        assert_eq!(json["autoScheduleEnabled"], true);
        assert_eq!(json["notificationsEnabled"], false);
        assert_eq!(json["remindersEnabled"], false);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings: ChoreSettings = serde_json::from_str("{\"daysOut\": 5}").unwrap();
        assert_eq!(settings.days_out, 5);
        assert_eq!(settings.hour_of_day, 17);
    }
}
