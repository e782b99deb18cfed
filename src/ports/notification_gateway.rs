//! Notification gateway port - timed alerts through a permissioned system.

use async_trait::async_trait;

use crate::domain::alerting::AlertPayload;
use crate::domain::foundation::NotificationRef;

use super::GatewayError;

/// Port for scheduling and cancelling timed alerts.
///
/// Every operation is best-effort from the orchestrators' point of view:
/// a failure never blocks the durable cycle record.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Schedules an alert for the payload's due instant.
    ///
    /// # Errors
    ///
    /// - `Authorization` when permission was declined or revoked
    /// - `Operation` on transient failure
    async fn schedule(&self, payload: AlertPayload) -> Result<NotificationRef, GatewayError>;

    /// Cancels a pending alert. Unknown refs are not an error.
    async fn cancel(&self, reference: &NotificationRef) -> Result<(), GatewayError>;

    /// Clears any delivered-alert badge or indicator.
    async fn clear_badge(&self) -> Result<(), GatewayError>;

    /// Whether the user has granted alert permission.
    async fn is_permission_granted(&self) -> bool;

    /// Prompts for alert permission. Returns whether access was granted.
    ///
    /// # Errors
    ///
    /// `Authorization` when the system forbids asking (restricted).
    async fn request_access(&self) -> Result<bool, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn notification_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn NotificationGateway) {}
    }
}
