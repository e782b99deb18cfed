//! Scheduling configuration - the calendar the due dates live in.

use serde::Deserialize;
use std::str::FromStr;

use super::error::ValidationError;

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Timezone the scheduling engine computes in.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// IANA timezone name, e.g. `America/New_York`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl SchedulingConfig {
    /// Parses the configured timezone.
    pub fn timezone(&self) -> Result<chrono_tz::Tz, ValidationError> {
        chrono_tz::Tz::from_str(&self.timezone)
            .map_err(|_| ValidationError::UnknownTimezone(self.timezone.clone()))
    }

    /// Validates the timezone name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.timezone().map(|_| ())
    }
}
