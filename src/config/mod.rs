//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHORE_REMINDER` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use chore_reminder::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Cycle snapshot at {:?}", config.storage.cycles_path());
//! ```

mod error;
mod scheduling;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use scheduling::SchedulingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage configuration (document paths)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Scheduling configuration (timezone)
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `CHORE_REMINDER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CHORE_REMINDER__STORAGE__DATA_DIR=/var/lib/chores`
    /// - `CHORE_REMINDER__SCHEDULING__TIMEZONE=America/New_York`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHORE_REMINDER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.scheduling.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("CHORE_REMINDER__STORAGE__DATA_DIR");
        env::remove_var("CHORE_REMINDER__SCHEDULING__TIMEZONE");
    }

    #[test]
    fn loads_defaults_with_no_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.storage.data_dir, std::path::PathBuf::from("./data"));
        assert_eq!(config.scheduling.timezone, "UTC");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CHORE_REMINDER__STORAGE__DATA_DIR", "/tmp/chores");
        env::set_var("CHORE_REMINDER__SCHEDULING__TIMEZONE", "Europe/Berlin");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.storage.data_dir,
            std::path::PathBuf::from("/tmp/chores")
        );
        assert_eq!(config.scheduling.timezone, "Europe/Berlin");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_timezone_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CHORE_REMINDER__SCHEDULING__TIMEZONE", "Nowhere/Void");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnknownTimezone(_))
        ));
    }
}
