//! DeleteCycleHandler - Command handler for removing a cycle.
//!
//! Gateway cleanup runs first and is best-effort; the store delete is the
//! primary, user-visible effect and its failure propagates.

use std::sync::Arc;

use crate::domain::foundation::CycleId;
use crate::ports::{CycleStore, NotificationGateway, PersistenceError, ReminderGateway};

/// Command to delete a cycle.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCycleCommand {
    pub cycle_id: CycleId,
}

/// Result of a successful delete.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCycleResult {
    /// Whether the reminder entry was cancelled (best-effort).
    pub reminder_cancelled: bool,
    /// Whether the pending notification was cancelled (best-effort).
    pub notification_cancelled: bool,
}

/// Error type for delete.
#[derive(Debug, Clone)]
pub enum DeleteCycleError {
    /// No cycle carries the given id.
    CycleNotFound(CycleId),
    /// The record could not be removed.
    Persistence(PersistenceError),
}

impl std::fmt::Display for DeleteCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteCycleError::CycleNotFound(id) => write!(f, "cycle not found: {}", id),
            DeleteCycleError::Persistence(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DeleteCycleError {}

impl From<PersistenceError> for DeleteCycleError {
    fn from(err: PersistenceError) -> Self {
        DeleteCycleError::Persistence(err)
    }
}

/// Handler for deleting cycles.
pub struct DeleteCycleHandler {
    cycle_store: Arc<dyn CycleStore>,
    notification_gateway: Arc<dyn NotificationGateway>,
    reminder_gateway: Arc<dyn ReminderGateway>,
}

impl DeleteCycleHandler {
    pub fn new(
        cycle_store: Arc<dyn CycleStore>,
        notification_gateway: Arc<dyn NotificationGateway>,
        reminder_gateway: Arc<dyn ReminderGateway>,
    ) -> Self {
        Self {
            cycle_store,
            notification_gateway,
            reminder_gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCycleCommand,
    ) -> Result<DeleteCycleResult, DeleteCycleError> {
        let cycle = self
            .cycle_store
            .fetch_by_id(cmd.cycle_id)
            .await?
            .ok_or(DeleteCycleError::CycleNotFound(cmd.cycle_id))?;

        // 1. Best-effort gateway cleanup; absence and failure both
        //    tolerated.
        let reminder_cancelled = match cycle.reminder_ref() {
            Some(reference) => match self.reminder_gateway.cancel(reference).await {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(error = %err, "cancelling the reminder entry failed");
                    false
                }
            },
            None => false,
        };
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

        // 2. The primary effect. Failure propagates: the user asked for
        //    the record to be gone.
        self.cycle_store.delete(cmd.cycle_id).await?;

        tracing::debug!(cycle_id = %cmd.cycle_id, "cycle deleted");

        Ok(DeleteCycleResult {
            reminder_cancelled,
            notification_cancelled,
        })
    }
}
