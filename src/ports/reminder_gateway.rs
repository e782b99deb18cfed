//! Reminder gateway port - task-list entries through a permissioned system.

use async_trait::async_trait;

use crate::domain::foundation::{ReminderRef, Timestamp};

use super::GatewayError;

/// Port for managing the single chore entry in the user's task list.
///
/// Same best-effort contract as the notification gateway: failures are
/// reported, never allowed to block the durable record.
#[async_trait]
pub trait ReminderGateway: Send + Sync {
    /// Creates the task-list entry for a due instant.
    ///
    /// # Errors
    ///
    /// - `Authorization` when permission was declined or revoked
    /// - `Operation` on transient failure
    async fn add_reminder(&self, due_at: Timestamp) -> Result<ReminderRef, GatewayError>;

    /// Marks the entry completed at the given instant.
    async fn complete(
        &self,
        reference: &ReminderRef,
        completed_at: Timestamp,
    ) -> Result<(), GatewayError>;

    /// Moves the entry's due date.
    async fn reschedule(
        &self,
        reference: &ReminderRef,
        new_due_at: Timestamp,
    ) -> Result<(), GatewayError>;

    /// Removes the entry. Unknown refs are not an error.
    async fn cancel(&self, reference: &ReminderRef) -> Result<(), GatewayError>;

    /// Whether the user has granted task-list access.
    async fn is_permission_granted(&self) -> bool;

    /// Prompts for task-list access. Returns whether access was granted.
    ///
    /// # Errors
    ///
    /// `Authorization` when the system forbids asking (restricted).
    async fn request_access(&self) -> Result<bool, GatewayError>;
}
