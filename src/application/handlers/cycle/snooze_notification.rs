//! SnoozeNotificationHandler - the "remind me tomorrow" notification action.
//!
//! The fired notification carries its due instant and occurrence counter.
//! Snoozing schedules a replacement alert one day later with the counter
//! bumped, then relinks the owning cycle. The cycle's own `scheduled_at`
//! is untouched: the chore is still due when it was due.

use std::sync::Arc;

use crate::domain::alerting::AlertPayload;
use crate::domain::cycle::Cycle;
use crate::domain::foundation::{ConfigurationError, NotificationRef, Timestamp};
use crate::ports::{
    CycleStore, GatewayError, NotificationGateway, PersistenceError, SchedulingEngine,
    SettingsStore, SettingsStoreError,
};

/// Days a single snooze postpones the alert.
const SNOOZE_DAYS: u32 = 1;

/// Command built from the fired notification's payload.
#[derive(Debug, Clone)]
pub struct SnoozeNotificationCommand {
    /// The fired notification's identifier, used to find the cycle.
    pub notification_ref: NotificationRef,
    /// The due instant the fired notification carried.
    pub due_at: Timestamp,
    /// The occurrence counter the fired notification carried.
    pub occurrence: u32,
}

/// Result of a successful snooze.
#[derive(Debug, Clone)]
pub struct SnoozeNotificationResult {
    /// The cycle, relinked to the replacement alert.
    pub cycle: Cycle,
    /// Handle of the replacement alert.
    pub new_notification_ref: NotificationRef,
    /// When the replacement alert fires.
    pub new_due_at: Timestamp,
    /// Occurrence counter of the replacement alert.
    pub occurrence: u32,
}

/// Error type for snooze.
#[derive(Debug, Clone)]
pub enum SnoozeNotificationError {
    /// No cycle is linked to the fired notification.
    CycleNotFound(NotificationRef),
    /// The snooze date cannot be represented.
    Configuration(ConfigurationError),
    /// Settings could not be loaded.
    Settings(SettingsStoreError),
    /// The replacement alert could not be scheduled; the cycle is
    /// unchanged and still points at the fired notification.
    Gateway(GatewayError),
    /// Relinking the cycle failed after the alert was scheduled.
    Persistence(PersistenceError),
}

impl std::fmt::Display for SnoozeNotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnoozeNotificationError::CycleNotFound(reference) => {
                write!(f, "no cycle linked to notification {}", reference)
            }
            SnoozeNotificationError::Configuration(err) => write!(f, "{}", err),
            SnoozeNotificationError::Settings(err) => write!(f, "{}", err),
            SnoozeNotificationError::Gateway(err) => write!(f, "{}", err),
            SnoozeNotificationError::Persistence(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SnoozeNotificationError {}

impl From<ConfigurationError> for SnoozeNotificationError {
    fn from(err: ConfigurationError) -> Self {
        SnoozeNotificationError::Configuration(err)
    }
}

impl From<SettingsStoreError> for SnoozeNotificationError {
    fn from(err: SettingsStoreError) -> Self {
        SnoozeNotificationError::Settings(err)
    }
}

impl From<PersistenceError> for SnoozeNotificationError {
    fn from(err: PersistenceError) -> Self {
        SnoozeNotificationError::Persistence(err)
    }
}

/// Handler for the snooze action.
pub struct SnoozeNotificationHandler {
    cycle_store: Arc<dyn CycleStore>,
    settings_store: Arc<dyn SettingsStore>,
    notification_gateway: Arc<dyn NotificationGateway>,
    scheduling_engine: Arc<dyn SchedulingEngine>,
}

impl SnoozeNotificationHandler {
    pub fn new(
        cycle_store: Arc<dyn CycleStore>,
        settings_store: Arc<dyn SettingsStore>,
        notification_gateway: Arc<dyn NotificationGateway>,
        scheduling_engine: Arc<dyn SchedulingEngine>,
    ) -> Self {
        Self {
            cycle_store,
            settings_store,
            notification_gateway,
            scheduling_engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: SnoozeNotificationCommand,
    ) -> Result<SnoozeNotificationResult, SnoozeNotificationError> {
        // 1. Correlate the fired notification back to its cycle.
        let mut cycle = self
            .cycle_store
            .fetch_by_notification_ref(&cmd.notification_ref)
            .await?
            .ok_or_else(|| {
                SnoozeNotificationError::CycleNotFound(cmd.notification_ref.clone())
            })?;

        // 2. One day later, at the configured hour.
        let settings = self.settings_store.load().await?;
        let new_due_at = self.scheduling_engine.snooze_date(
            cmd.due_at,
            SNOOZE_DAYS,
            settings.hour_of_day,
        )?;

        // 3. Replacement alert with the counter bumped. If this fails the
        //    cycle stays linked to the fired notification.
        let payload = AlertPayload::new(cmd.due_at, cmd.occurrence).escalated(new_due_at);
        let new_notification_ref = self
            .notification_gateway
            .schedule(payload)
            .await
            .map_err(SnoozeNotificationError::Gateway)?;

        // 4. Relink the cycle to the replacement.
        cycle.relink_notification(new_notification_ref.clone());
        self.cycle_store.update(&cycle).await?;

        tracing::debug!(
            cycle_id = %cycle.id(),
            occurrence = payload.occurrence,
            new_due_at = %new_due_at,
            "notification snoozed"
        );

        Ok(SnoozeNotificationResult {
            cycle,
            new_notification_ref,
            new_due_at,
            occurrence: payload.occurrence,
        })
    }
}
