//! Persisted snapshot format for the file-backed cycle store.
//!
//! The store keeps one JSON document: a schema version plus the list of
//! cycle records. Records are held as raw JSON values until the snapshot
//! has been migrated to the current version; migration stages only ever
//! touch the identifier field, so everything else round-trips untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleId, NotificationRef, ReminderRef, Timestamp};
use crate::ports::PersistenceError;

/// Schema version written by this build.
///
/// - v1: `{createdAt, scheduledAt, completedAt?, notificationRef?, reminderRef?}`
/// - v2: adds required unique `id`
/// - v3: `id` becomes a plain string with a generated default
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// The on-disk document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub schema_version: u32,
    pub cycles: Vec<JsonValue>,
}

impl StoreSnapshot {
    /// An empty snapshot at the current version.
    pub fn empty() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            cycles: Vec::new(),
        }
    }
}

/// One cycle record at the current (v3) schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    pub id: String,
    pub created_at: Timestamp,
    pub scheduled_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_ref: Option<NotificationRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_ref: Option<ReminderRef>,
}

impl CycleRecord {
    /// Builds the record for a domain cycle.
    pub fn from_cycle(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id().to_string(),
            created_at: cycle.created_at(),
            scheduled_at: cycle.scheduled_at(),
            completed_at: cycle.completed_at(),
            notification_ref: cycle.notification_ref().cloned(),
            reminder_ref: cycle.reminder_ref().cloned(),
        }
    }

    /// Reconstitutes the domain cycle.
    ///
    /// # Errors
    ///
    /// `Deserialization` when the stored identifier is not a UUID string.
    pub fn into_cycle(self) -> Result<Cycle, PersistenceError> {
        let id: CycleId = self
            .id
            .parse()
            .map_err(|e| PersistenceError::Deserialization(format!("bad cycle id: {e}")))?;
        Ok(Cycle::reconstitute(
            id,
            self.created_at,
            self.scheduled_at,
            self.completed_at,
            self.notification_ref,
            self.reminder_ref,
        ))
    }

    /// Parses a record from a migrated snapshot entry.
    pub fn from_json(value: JsonValue) -> Result<Self, PersistenceError> {
        serde_json::from_value(value)
            .map_err(|e| PersistenceError::Deserialization(e.to_string()))
    }

    /// Serializes the record for the snapshot.
    pub fn to_json(&self) -> Result<JsonValue, PersistenceError> {
        serde_json::to_value(self).map_err(|e| PersistenceError::Serialization(e.to_string()))
    }
}
