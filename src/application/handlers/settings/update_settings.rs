//! UpdateSettingsHandler - Command handler for changing chore settings.
//!
//! Enabling a channel is the one place an authorization failure is a
//! first-class error rather than a tolerated outcome: the whole point of
//! the toggle is the permission, so a decline surfaces as a recoverable
//! error directing the user to system settings.

use std::sync::Arc;

use crate::domain::foundation::ValidationError;
use crate::domain::settings::ChoreSettings;
use crate::ports::{
    GatewayError, NotificationGateway, ReminderGateway, SettingsStore, SettingsStoreError,
};

/// The channel a permission request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Notifications,
    Reminders,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Notifications => write!(f, "notifications"),
            Channel::Reminders => write!(f, "reminders"),
        }
    }
}

/// Command carrying the full desired settings value.
#[derive(Debug, Clone, Copy)]
pub struct UpdateSettingsCommand {
    pub settings: ChoreSettings,
}

/// Result of a successful update.
#[derive(Debug, Clone, Copy)]
pub struct UpdateSettingsResult {
    /// The settings as persisted.
    pub settings: ChoreSettings,
}

/// Error type for settings updates.
#[derive(Debug, Clone)]
pub enum UpdateSettingsError {
    /// A field is out of range.
    Validation(ValidationError),
    /// The user declined the permission prompt for a channel being
    /// enabled. Recoverable by granting access in system settings.
    PermissionDenied(Channel),
    /// The permission prompt itself failed.
    Gateway(GatewayError),
    /// The settings could not be persisted.
    Store(SettingsStoreError),
}

impl std::fmt::Display for UpdateSettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateSettingsError::Validation(err) => write!(f, "{}", err),
            UpdateSettingsError::PermissionDenied(channel) => {
                write!(f, "permission denied enabling {}", channel)
            }
            UpdateSettingsError::Gateway(err) => write!(f, "{}", err),
            UpdateSettingsError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UpdateSettingsError {}

impl From<ValidationError> for UpdateSettingsError {
    fn from(err: ValidationError) -> Self {
        UpdateSettingsError::Validation(err)
    }
}

impl From<SettingsStoreError> for UpdateSettingsError {
    fn from(err: SettingsStoreError) -> Self {
        UpdateSettingsError::Store(err)
    }
}

/// Handler for settings updates.
pub struct UpdateSettingsHandler {
    settings_store: Arc<dyn SettingsStore>,
    notification_gateway: Arc<dyn NotificationGateway>,
    reminder_gateway: Arc<dyn ReminderGateway>,
}

impl UpdateSettingsHandler {
    pub fn new(
        settings_store: Arc<dyn SettingsStore>,
        notification_gateway: Arc<dyn NotificationGateway>,
        reminder_gateway: Arc<dyn ReminderGateway>,
    ) -> Self {
        Self {
            settings_store,
            notification_gateway,
            reminder_gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSettingsCommand,
    ) -> Result<UpdateSettingsResult, UpdateSettingsError> {
        // 1. Range checks.
        cmd.settings.validate()?;

        let previous = self.settings_store.load().await?;

        // 2. A channel being toggled on needs its permission first.
        if cmd.settings.notifications_enabled
            && !previous.notifications_enabled
            && !self.notification_gateway.is_permission_granted().await
        {
            let granted = self
                .notification_gateway
                .request_access()
                .await
                .map_err(UpdateSettingsError::Gateway)?;
            if !granted {
                return Err(UpdateSettingsError::PermissionDenied(
                    Channel::Notifications,
                ));
            }
        }

        if cmd.settings.reminders_enabled
            && !previous.reminders_enabled
            && !self.reminder_gateway.is_permission_granted().await
        {
            let granted = self
                .reminder_gateway
                .request_access()
                .await
                .map_err(UpdateSettingsError::Gateway)?;
            if !granted {
                return Err(UpdateSettingsError::PermissionDenied(Channel::Reminders));
            }
        }

        // 3. Persist.
        self.settings_store.save(&cmd.settings).await?;

        tracing::debug!(
            days_out = cmd.settings.days_out,
            hour_of_day = cmd.settings.hour_of_day,
            "settings updated"
        );

        Ok(UpdateSettingsResult {
            settings: cmd.settings,
        })
    }
}
