//! In-memory notification gateway adapter.
//!
//! Simulates the permissioned alert system for development and tests:
//! tracks pending alerts by ref, honors a permission flag, and can be
//! told to fail operations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::alerting::AlertPayload;
use crate::domain::foundation::NotificationRef;
use crate::ports::{GatewayError, NotificationGateway};

#[derive(Debug, Default)]
struct GatewayState {
    pending: HashMap<NotificationRef, AlertPayload>,
    cancelled: Vec<NotificationRef>,
    permission_granted: bool,
    grant_on_request: bool,
    fail_operations: bool,
    badge_clears: u32,
}

/// In-memory notification gateway.
#[derive(Debug, Clone)]
pub struct InMemoryNotificationGateway {
    state: Arc<RwLock<GatewayState>>,
}

impl InMemoryNotificationGateway {
    /// Gateway with permission already granted.
    pub fn new() -> Self {
        Self::with_state(GatewayState {
            permission_granted: true,
            grant_on_request: true,
            ..GatewayState::default()
        })
    }

    /// Gateway whose user has not granted permission yet; a request will
    /// be granted.
    pub fn without_permission() -> Self {
        Self::with_state(GatewayState {
            grant_on_request: true,
            ..GatewayState::default()
        })
    }

    /// Gateway whose user declines the permission prompt.
    pub fn declining() -> Self {
        Self::with_state(GatewayState::default())
    }

    /// Gateway whose operations fail transiently.
    pub fn failing() -> Self {
        Self::with_state(GatewayState {
            permission_granted: true,
            grant_on_request: true,
            fail_operations: true,
            ..GatewayState::default()
        })
    }

    fn with_state(state: GatewayState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Number of pending alerts (for tests).
    pub async fn pending_count(&self) -> usize {
        self.state.read().await.pending.len()
    }

    /// Payload of a pending alert (for tests).
    pub async fn pending(&self, reference: &NotificationRef) -> Option<AlertPayload> {
        self.state.read().await.pending.get(reference).copied()
    }

    /// Whether the ref was cancelled (for tests).
    pub async fn was_cancelled(&self, reference: &NotificationRef) -> bool {
        self.state.read().await.cancelled.contains(reference)
    }

    /// Number of badge clears (for tests).
    pub async fn badge_clears(&self) -> u32 {
        self.state.read().await.badge_clears
    }
}

impl Default for InMemoryNotificationGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationGateway for InMemoryNotificationGateway {
    async fn schedule(&self, payload: AlertPayload) -> Result<NotificationRef, GatewayError> {
        let mut state = self.state.write().await;
        if !state.permission_granted {
            return Err(GatewayError::Authorization(
                "notification permission not granted".to_string(),
            ));
        }
        if state.fail_operations {
            return Err(GatewayError::Operation(
                "simulated notification failure".to_string(),
            ));
        }

        let reference = NotificationRef::new(Uuid::new_v4().to_string());
        state.pending.insert(reference.clone(), payload);
        Ok(reference)
    }

    async fn cancel(&self, reference: &NotificationRef) -> Result<(), GatewayError> {
        let mut state = self.state.write().await;
        if state.fail_operations {
            return Err(GatewayError::Operation(
                "simulated notification failure".to_string(),
            ));
        }
        // Unknown refs are fine; the alert may already have fired.
        state.pending.remove(reference);
        state.cancelled.push(reference.clone());
        Ok(())
    }

    async fn clear_badge(&self) -> Result<(), GatewayError> {
        let mut state = self.state.write().await;
        if state.fail_operations {
            return Err(GatewayError::Operation(
                "simulated notification failure".to_string(),
            ));
        }
        state.badge_clears += 1;
        Ok(())
    }

    async fn is_permission_granted(&self) -> bool {
        self.state.read().await.permission_granted
    }

    async fn request_access(&self) -> Result<bool, GatewayError> {
        let mut state = self.state.write().await;
        if state.grant_on_request {
            state.permission_granted = true;
        }
        Ok(state.permission_granted)
    }
}
