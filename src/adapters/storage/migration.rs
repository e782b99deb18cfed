//! Migration pipeline for the persisted snapshot schema.
//!
//! Stages form an ordered table keyed by source version and run once at
//! store open, strictly increasing, each stage total and idempotent at its
//! target version. Every stage builds the complete target record list
//! first, the pipeline verifies the count matches, and only then is the
//! source list replaced - an interrupted migration can therefore never
//! lose records, only leave the old snapshot in place.

use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

use super::schema::{StoreSnapshot, CURRENT_SCHEMA_VERSION};

/// Failure evolving a snapshot to the current schema.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("record count mismatch migrating v{from} to v{to}: expected {expected}, got {actual}")]
    RecordCountMismatch {
        from: u32,
        to: u32,
        expected: usize,
        actual: usize,
    },

    #[error("snapshot version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("no migration stage registered for version {0}")]
    MissingStage(u32),

    #[error("record transform failed: {0}")]
    InvalidRecord(String),
}

/// One versioned transformation step.
///
/// `migrate` receives the full record list and returns the transformed
/// list; it must preserve every field it does not explicitly change.
pub trait MigrationStage: Send + Sync {
    /// Version this stage reads.
    fn source_version(&self) -> u32;

    /// Version this stage writes.
    fn target_version(&self) -> u32;

    /// Transforms all records from source to target shape.
    fn migrate(&self, records: Vec<JsonValue>) -> Result<Vec<JsonValue>, MigrationError>;
}

/// v1 -> v2: synthesize the required unique `id` field.
///
/// All other fields carry over unchanged. Records that already have an id
/// keep it, which makes a re-run a no-op.
pub struct AddRecordIdentifiers;

impl MigrationStage for AddRecordIdentifiers {
    fn source_version(&self) -> u32 {
        1
    }

    fn target_version(&self) -> u32 {
        2
    }

    fn migrate(&self, records: Vec<JsonValue>) -> Result<Vec<JsonValue>, MigrationError> {
        records
            .into_iter()
            .map(|mut record| {
                let map = record.as_object_mut().ok_or_else(|| {
                    MigrationError::InvalidRecord("cycle record is not an object".to_string())
                })?;
                if !map.contains_key("id") {
                    map.insert(
                        "id".to_string(),
                        JsonValue::String(Uuid::new_v4().to_string()),
                    );
                }
                Ok(record)
            })
            .collect()
    }
}

/// v2 -> v3: identifier becomes a plain string, generated when missing.
///
/// Declarative stage - the only rule is the default value; every other
/// field passes through untouched.
pub struct StringifyIdentifiers;

impl MigrationStage for StringifyIdentifiers {
    fn source_version(&self) -> u32 {
        2
    }

    fn target_version(&self) -> u32 {
        3
    }

    fn migrate(&self, records: Vec<JsonValue>) -> Result<Vec<JsonValue>, MigrationError> {
        records
            .into_iter()
            .map(|mut record| {
                let map = record.as_object_mut().ok_or_else(|| {
                    MigrationError::InvalidRecord("cycle record is not an object".to_string())
                })?;
                match map.get("id") {
                    Some(JsonValue::String(_)) => {}
                    Some(JsonValue::Null) | None => {
                        map.insert(
                            "id".to_string(),
                            JsonValue::String(Uuid::new_v4().to_string()),
                        );
                    }
                    Some(other) => {
                        return Err(MigrationError::InvalidRecord(format!(
                            "unexpected id representation: {other}"
                        )));
                    }
                }
                Ok(record)
            })
            .collect()
    }
}

/// Ordered stage table, applied at store open.
pub struct MigrationPipeline {
    stages: Vec<Arc<dyn MigrationStage>>,
}

impl MigrationPipeline {
    /// Pipeline holding the full v1 -> v3 history.
    pub fn standard() -> Self {
        Self {
            stages: vec![Arc::new(AddRecordIdentifiers), Arc::new(StringifyIdentifiers)],
        }
    }

    /// Evolves a snapshot to [`CURRENT_SCHEMA_VERSION`].
    ///
    /// A snapshot already at the current version passes through untouched;
    /// a newer one is refused rather than guessed at.
    ///
    /// # Errors
    ///
    /// - `UnsupportedVersion` when the snapshot is from a newer build
    /// - `MissingStage` when the version history has a gap
    /// - `RecordCountMismatch` when a stage dropped or duplicated records
    /// - `InvalidRecord` when a record cannot be transformed
    pub fn run(&self, snapshot: StoreSnapshot) -> Result<StoreSnapshot, MigrationError> {
        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(MigrationError::UnsupportedVersion {
                found: snapshot.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }

        let mut current = snapshot;
        while current.schema_version < CURRENT_SCHEMA_VERSION {
            let stage = self
                .stages
                .iter()
                .find(|s| s.source_version() == current.schema_version)
                .ok_or(MigrationError::MissingStage(current.schema_version))?;

            let expected = current.cycles.len();
            let migrated = stage.migrate(current.cycles)?;
            if migrated.len() != expected {
                return Err(MigrationError::RecordCountMismatch {
                    from: stage.source_version(),
                    to: stage.target_version(),
                    expected,
                    actual: migrated.len(),
                });
            }

            tracing::info!(
                from = stage.source_version(),
                to = stage.target_version(),
                records = migrated.len(),
                "migrated cycle store snapshot"
            );

            current = StoreSnapshot {
                schema_version: stage.target_version(),
                cycles: migrated,
            };
        }

        Ok(current)
    }
}

impl Default for MigrationPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
