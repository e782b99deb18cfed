//! In-memory reminder gateway adapter.
//!
//! Simulates the task-list system: one entry per ref with the fixed chore
//! title, minute-granularity due components, and an alarm at the due
//! instant.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::alerting::ReminderItem;
use crate::domain::foundation::{ReminderRef, Timestamp};
use crate::ports::{GatewayError, ReminderGateway};

/// One stored task-list entry.
#[derive(Debug, Clone, Copy)]
pub struct StoredReminder {
    pub item: ReminderItem,
    pub completed_at: Option<Timestamp>,
}

#[derive(Debug, Default)]
struct GatewayState {
    entries: HashMap<ReminderRef, StoredReminder>,
    permission_granted: bool,
    grant_on_request: bool,
    fail_operations: bool,
}

/// In-memory reminder gateway.
#[derive(Debug, Clone)]
pub struct InMemoryReminderGateway {
    state: Arc<RwLock<GatewayState>>,
}

impl InMemoryReminderGateway {
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

    /// Number of entries (for tests).
    pub async fn entry_count(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Stored entry for a ref (for tests).
    pub async fn entry(&self, reference: &ReminderRef) -> Option<StoredReminder> {
        self.state.read().await.entries.get(reference).copied()
    }
}

impl Default for InMemoryReminderGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderGateway for InMemoryReminderGateway {
    async fn add_reminder(&self, due_at: Timestamp) -> Result<ReminderRef, GatewayError> {
        let mut state = self.state.write().await;
        if !state.permission_granted {
            return Err(GatewayError::Authorization(
                "reminder permission not granted".to_string(),
            ));
        }
        if state.fail_operations {
            return Err(GatewayError::Operation(
                "simulated reminder failure".to_string(),
            ));
        }

        let reference = ReminderRef::new(Uuid::new_v4().to_string());
        state.entries.insert(
            reference.clone(),
            StoredReminder {
                item: ReminderItem::for_due_date(due_at),
                completed_at: None,
            },
        );
        Ok(reference)
    }

    async fn complete(
        &self,
        reference: &ReminderRef,
        completed_at: Timestamp,
    ) -> Result<(), GatewayError> {
        let mut state = self.state.write().await;
        if state.fail_operations {
            return Err(GatewayError::Operation(
                "simulated reminder failure".to_string(),
            ));
        }
        let entry = state
            .entries
            .get_mut(reference)
            .ok_or_else(|| GatewayError::Operation(format!("unknown reminder {reference}")))?;
        entry.completed_at = Some(completed_at);
        Ok(())
    }

    async fn reschedule(
        &self,
        reference: &ReminderRef,
        new_due_at: Timestamp,
    ) -> Result<(), GatewayError> {
        let mut state = self.state.write().await;
        if state.fail_operations {
            return Err(GatewayError::Operation(
                "simulated reminder failure".to_string(),
            ));
        }
        let entry = state
            .entries
            .get_mut(reference)
            .ok_or_else(|| GatewayError::Operation(format!("unknown reminder {reference}")))?;
        entry.item = ReminderItem::for_due_date(new_due_at);
        Ok(())
    }

    async fn cancel(&self, reference: &ReminderRef) -> Result<(), GatewayError> {
        let mut state = self.state.write().await;
        if state.fail_operations {
            return Err(GatewayError::Operation(
                "simulated reminder failure".to_string(),
            ));
        }
        // Unknown refs are fine; the entry may have been removed by hand.
        state.entries.remove(reference);
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
