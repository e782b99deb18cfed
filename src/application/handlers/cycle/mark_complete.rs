//! MarkCompleteHandler - Command handler for completing the active cycle.
//!
//! The durable completion write comes first; every gateway interaction
//! after it is best-effort and can never roll it back.

use std::sync::Arc;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleId, Timestamp};
use crate::ports::{
    CycleStore, NotificationGateway, PersistenceError, ReminderGateway, SettingsStore,
    SettingsStoreError,
};

use super::{AddCycleCommand, AddCycleError, AddCycleHandler, AddCycleResult};

/// Command to mark a cycle complete.
#[derive(Debug, Clone, Copy)]
pub struct MarkCompleteCommand {
    /// The cycle being completed.
    pub cycle_id: CycleId,
    /// When the chore was done.
    pub completed_at: Timestamp,
    /// Whether to schedule the successor cycle. Combined with the
    /// `auto_schedule_enabled` setting; both must hold.
    pub schedule_next: bool,
}

/// Result of a completed mark-complete operation.
#[derive(Debug, Clone)]
pub struct MarkCompleteResult {
    /// The cycle, now carrying its completion date.
    pub cycle: Cycle,
    /// Whether the reminder entry was marked done (best-effort).
    pub reminder_completed: bool,
    /// Whether the pending notification was cancelled (best-effort).
    pub notification_cancelled: bool,
    /// The successor, when one was scheduled.
    pub next_cycle: Option<AddCycleResult>,
}

/// Error type for mark-complete.
#[derive(Debug, Clone)]
pub enum MarkCompleteError {
    /// No cycle carries the given id.
    CycleNotFound(CycleId),
    /// The cycle already has a completion date.
    AlreadyCompleted(CycleId),
    /// Settings could not be loaded for successor scheduling. The
    /// completion itself was durably recorded before this surfaced.
    Settings(SettingsStoreError),
    /// The completion write failed; nothing else was attempted.
    Persistence(PersistenceError),
    /// Scheduling the successor failed. The completion itself was
    /// durably recorded before this surfaced.
    ScheduleNext(Box<AddCycleError>),
}

impl std::fmt::Display for MarkCompleteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkCompleteError::CycleNotFound(id) => write!(f, "cycle not found: {}", id),
            MarkCompleteError::AlreadyCompleted(id) => {
                write!(f, "cycle already completed: {}", id)
            }
            MarkCompleteError::Settings(err) => write!(f, "{}", err),
            MarkCompleteError::Persistence(err) => write!(f, "{}", err),
            MarkCompleteError::ScheduleNext(err) => {
                write!(f, "completed, but scheduling the next cycle failed: {}", err)
            }
        }
    }
}

impl std::error::Error for MarkCompleteError {}

impl From<PersistenceError> for MarkCompleteError {
    fn from(err: PersistenceError) -> Self {
        MarkCompleteError::Persistence(err)
    }
}

impl From<SettingsStoreError> for MarkCompleteError {
    fn from(err: SettingsStoreError) -> Self {
        MarkCompleteError::Settings(err)
    }
}

/// Handler for completing cycles.
pub struct MarkCompleteHandler {
    cycle_store: Arc<dyn CycleStore>,
    settings_store: Arc<dyn SettingsStore>,
    notification_gateway: Arc<dyn NotificationGateway>,
    reminder_gateway: Arc<dyn ReminderGateway>,
    add_cycle: Arc<AddCycleHandler>,
}

impl MarkCompleteHandler {
    pub fn new(
        cycle_store: Arc<dyn CycleStore>,
        settings_store: Arc<dyn SettingsStore>,
        notification_gateway: Arc<dyn NotificationGateway>,
        reminder_gateway: Arc<dyn ReminderGateway>,
        add_cycle: Arc<AddCycleHandler>,
    ) -> Self {
        Self {
            cycle_store,
            settings_store,
            notification_gateway,
            reminder_gateway,
            add_cycle,
        }
    }

    pub async fn handle(
        &self,
        cmd: MarkCompleteCommand,
    ) -> Result<MarkCompleteResult, MarkCompleteError> {
        // 1. The primary effect: record the completion. A failure here is
        //    fatal and nothing else runs.
        let mut cycle = self
            .cycle_store
            .fetch_by_id(cmd.cycle_id)
            .await?
            .ok_or(MarkCompleteError::CycleNotFound(cmd.cycle_id))?;
        if cycle.is_complete() {
            return Err(MarkCompleteError::AlreadyCompleted(cmd.cycle_id));
        }
        cycle.mark_complete(cmd.completed_at);
        self.cycle_store.update(&cycle).await?;

        // 2. Best-effort: mark the reminder entry done.
        let reminder_completed = match cycle.reminder_ref() {
            Some(reference) => match self
                .reminder_gateway
                .complete(reference, cmd.completed_at)
                .await
            {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(error = %err, "completing the reminder entry failed");
                    false
                }
            },
            None => false,
        };

        // 3. Best-effort: cancel the pending notification and clear any
        //    delivered badge.
        let notification_cancelled = match cycle.notification_ref() {
            Some(reference) => match self.notification_gateway.cancel(reference).await {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(error = %err, "cancelling the notification failed");
                    false
                }
            },
            None => false,
        };
        if let Err(err) = self.notification_gateway.clear_badge().await {
            tracing::warn!(error = %err, "clearing the badge failed");
        }

        // 4. Schedule the successor with now = completed_at.
        let next_cycle = if cmd.schedule_next {
            let settings = self.settings_store.load().await?;
            if settings.auto_schedule_enabled {
                let result = self
                    .add_cycle
                    .handle(AddCycleCommand {
                        now: cmd.completed_at,
                    })
                    .await
                    .map_err(|e| MarkCompleteError::ScheduleNext(Box::new(e)))?;
                Some(result)
            } else {
                None
            }
        } else {
            None
        };

        Ok(MarkCompleteResult {
            cycle,
            reminder_completed,
            notification_cancelled,
            next_cycle,
        })
    }
}
