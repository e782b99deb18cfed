//! AddCycleHandler - Command handler for scheduling a new chore cycle.

use std::sync::Arc;

use crate::domain::alerting::AlertPayload;
use crate::domain::cycle::Cycle;
use crate::domain::foundation::{
    ConfigurationError, CycleId, NotificationRef, ReminderRef, Timestamp,
};
use crate::ports::{
    CycleStore, NotificationGateway, PersistenceError, ReminderGateway, SchedulingEngine,
    SettingsStore, SettingsStoreError,
};

use super::ChannelOutcome;

/// Command to schedule a new cycle.
#[derive(Debug, Clone, Copy)]
pub struct AddCycleCommand {
    /// The moment the user asked; becomes `created_at` and the base of
    /// the due-date arithmetic.
    pub now: Timestamp,
}

/// Result of successful cycle creation.
///
/// Either channel may have failed; the cycle record exists regardless.
#[derive(Debug, Clone)]
pub struct AddCycleResult {
    /// The persisted cycle.
    pub cycle: Cycle,
    /// What happened on the notification channel.
    pub notification: ChannelOutcome<NotificationRef>,
    /// What happened on the reminder channel.
    pub reminder: ChannelOutcome<ReminderRef>,
}

/// Error type for cycle creation.
#[derive(Debug, Clone)]
pub enum AddCycleError {
    /// A non-completed cycle already exists; only one may be active.
    ActiveCycleExists(CycleId),
    /// The scheduling parameters cannot produce a valid due instant.
    Configuration(ConfigurationError),
    /// Settings could not be loaded.
    Settings(SettingsStoreError),
    /// The durable record could not be written.
    Persistence(PersistenceError),
}

impl std::fmt::Display for AddCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddCycleError::ActiveCycleExists(id) => {
                write!(f, "an active cycle already exists: {}", id)
            }
            AddCycleError::Configuration(err) => write!(f, "{}", err),
            AddCycleError::Settings(err) => write!(f, "{}", err),
            AddCycleError::Persistence(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AddCycleError {}

impl From<ConfigurationError> for AddCycleError {
    fn from(err: ConfigurationError) -> Self {
        AddCycleError::Configuration(err)
    }
}

impl From<SettingsStoreError> for AddCycleError {
    fn from(err: SettingsStoreError) -> Self {
        AddCycleError::Settings(err)
    }
}

impl From<PersistenceError> for AddCycleError {
    fn from(err: PersistenceError) -> Self {
        AddCycleError::Persistence(err)
    }
}

/// Handler for scheduling new cycles.
pub struct AddCycleHandler {
    cycle_store: Arc<dyn CycleStore>,
    settings_store: Arc<dyn SettingsStore>,
    notification_gateway: Arc<dyn NotificationGateway>,
    reminder_gateway: Arc<dyn ReminderGateway>,
    scheduling_engine: Arc<dyn SchedulingEngine>,
}

impl AddCycleHandler {
    pub fn new(
        cycle_store: Arc<dyn CycleStore>,
        settings_store: Arc<dyn SettingsStore>,
        notification_gateway: Arc<dyn NotificationGateway>,
        reminder_gateway: Arc<dyn ReminderGateway>,
        scheduling_engine: Arc<dyn SchedulingEngine>,
    ) -> Self {
        Self {
            cycle_store,
            settings_store,
            notification_gateway,
            reminder_gateway,
            scheduling_engine,
        }
    }

    pub async fn handle(&self, cmd: AddCycleCommand) -> Result<AddCycleResult, AddCycleError> {
        // 1. Settings are read on every call; the store is the only cache.
        let settings = self.settings_store.load().await?;

        // 2. Only one non-completed cycle may exist at a time.
        if let Some(active) = self.cycle_store.fetch_active().await? {
            return Err(AddCycleError::ActiveCycleExists(active.id()));
        }

        // 3. Compute the due instant. Configuration failures abort before
        //    any external side effect.
        let scheduled_at = self.scheduling_engine.next_due_date(
            cmd.now,
            settings.days_out,
            settings.hour_of_day,
        )?;

        // 4. Best-effort notification.
        let notification = if settings.notifications_enabled {
            match self
                .notification_gateway
                .schedule(AlertPayload::first(scheduled_at))
                .await
            {
                Ok(reference) => ChannelOutcome::Linked(reference),
                Err(err) => {
                    tracing::warn!(error = %err, "notification scheduling failed; cycle proceeds without an alert");
                    ChannelOutcome::Failed(err)
                }
            }
        } else {
            ChannelOutcome::Disabled
        };

        // 5. Best-effort reminder.
        let reminder = if settings.reminders_enabled {
            match self.reminder_gateway.add_reminder(scheduled_at).await {
                Ok(reference) => ChannelOutcome::Linked(reference),
                Err(err) => {
                    tracing::warn!(error = %err, "reminder creation failed; cycle proceeds without a task entry");
                    ChannelOutcome::Failed(err)
                }
            }
        } else {
            ChannelOutcome::Disabled
        };

        // 6. The durable record. This step always runs and its outcome is
        //    the operation's outcome.
        let cycle = Cycle::new(
            cmd.now,
            scheduled_at,
            notification.reference().cloned(),
            reminder.reference().cloned(),
        );
        self.cycle_store.add(&cycle).await?;

        tracing::debug!(cycle_id = %cycle.id(), scheduled_at = %scheduled_at, "cycle scheduled");

        Ok(AddCycleResult {
            cycle,
            notification,
            reminder,
        })
    }
}
