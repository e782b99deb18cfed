//! Shared error type for the two best-effort gateway ports.

use thiserror::Error;

/// Failure reported by a notification or reminder gateway.
///
/// Gateways are best-effort collaborators: handlers catch this at their
/// boundary and convert it to a reported-but-non-blocking outcome. The one
/// distinction that matters to callers is whether the user can fix it.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The user declined or revoked permission. Recoverable by directing
    /// the user to system settings.
    #[error("permission denied by the user or system: {0}")]
    Authorization(String),

    /// Transient external failure.
    #[error("gateway operation failed: {0}")]
    Operation(String),
}

impl GatewayError {
    /// True when the failure can be resolved by the user granting access.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GatewayError::Authorization(_))
    }
}
