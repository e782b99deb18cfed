//! File-backed cycle store adapter.
//!
//! Persists the snapshot document as JSON. The migration pipeline runs at
//! open, before any caller sees the store. Writes go to a temp file that
//! is renamed over the real one, and the in-memory record list is only
//! replaced after the rename succeeds - a failed write leaves both the
//! file and the served records exactly as they were.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleId, NotificationRef};
use crate::ports::{CycleStore, PersistenceError};

use super::migration::MigrationPipeline;
use super::schema::{CycleRecord, StoreSnapshot, CURRENT_SCHEMA_VERSION};

/// File-backed cycle store.
#[derive(Debug, Clone)]
pub struct FileCycleStore {
    path: PathBuf,
    records: Arc<RwLock<Vec<CycleRecord>>>,
}

impl FileCycleStore {
    /// Opens the store, migrating the snapshot to the current schema.
    ///
    /// A missing file starts an empty store; the file is created on the
    /// first mutation. A snapshot that needed migration is rewritten
    /// before the store is handed out.
    ///
    /// # Errors
    ///
    /// - `Io` when the file cannot be read
    /// - `Deserialization` when the document is not a valid snapshot
    /// - `Migration` when the pipeline cannot reach the current version
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();

        let snapshot = match fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str::<StoreSnapshot>(&contents)
                .map_err(|e| PersistenceError::Deserialization(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreSnapshot::empty(),
            Err(e) => return Err(PersistenceError::Io(e.to_string())),
        };

        let migrated_from = snapshot.schema_version;
        let snapshot = MigrationPipeline::standard()
            .run(snapshot)
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;

        let records: Vec<CycleRecord> = snapshot
            .cycles
            .into_iter()
            .map(CycleRecord::from_json)
            .collect::<Result<_, _>>()?;

        let store = Self {
            path,
            records: Arc::new(RwLock::new(records)),
        };

        if migrated_from != CURRENT_SCHEMA_VERSION {
            let records = store.records.read().await;
            store.persist(&records).await?;
        }

        Ok(store)
    }

    async fn persist(&self, records: &[CycleRecord]) -> Result<(), PersistenceError> {
        let cycles = records
            .iter()
            .map(CycleRecord::to_json)
            .collect::<Result<Vec<_>, _>>()?;
        let snapshot = StoreSnapshot {
            schema_version: CURRENT_SCHEMA_VERSION,
            cycles,
        };
        let contents = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PersistenceError::Io(e.to_string()))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)
            .await
            .map_err(|e| PersistenceError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PersistenceError::Io(e.to_string()))?;
        Ok(())
    }

    async fn all_cycles(&self) -> Result<Vec<Cycle>, PersistenceError> {
        let records = self.records.read().await;
        records.iter().cloned().map(CycleRecord::into_cycle).collect()
    }
}

#[async_trait]
impl CycleStore for FileCycleStore {
    async fn add(&self, cycle: &Cycle) -> Result<CycleId, PersistenceError> {
        let mut records = self.records.write().await;
        let mut next = records.clone();
        next.push(CycleRecord::from_cycle(cycle));

        self.persist(&next).await?;
        *records = next;
        Ok(cycle.id())
    }

    async fn update(&self, cycle: &Cycle) -> Result<(), PersistenceError> {
        let mut records = self.records.write().await;
        let id = cycle.id().to_string();
        let mut next = records.clone();
        let slot = next
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(PersistenceError::NotFound(cycle.id()))?;
        *slot = CycleRecord::from_cycle(cycle);

        self.persist(&next).await?;
        *records = next;
        Ok(())
    }

    async fn delete(&self, id: CycleId) -> Result<(), PersistenceError> {
        let mut records = self.records.write().await;
        let key = id.to_string();
        let mut next = records.clone();
        let position = next
            .iter()
            .position(|r| r.id == key)
            .ok_or(PersistenceError::NotFound(id))?;
        next.remove(position);

        self.persist(&next).await?;
        *records = next;
        Ok(())
    }

    async fn fetch_by_id(&self, id: CycleId) -> Result<Option<Cycle>, PersistenceError> {
        Ok(self
            .all_cycles()
            .await?
            .into_iter()
            .find(|c| c.id() == id))
    }

    async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<Cycle>, PersistenceError> {
        let mut all = self.all_cycles().await?;
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        if let Some(limit) = limit {
            all.truncate(limit);
        }
        Ok(all)
    }

    async fn fetch_active(&self) -> Result<Option<Cycle>, PersistenceError> {
        Ok(self
            .all_cycles()
            .await?
            .into_iter()
            .filter(|c| !c.is_complete())
            .min_by_key(|c| c.scheduled_at()))
    }

    async fn fetch_completed(&self) -> Result<Vec<Cycle>, PersistenceError> {
        let mut completed: Vec<Cycle> = self
            .all_cycles()
            .await?
            .into_iter()
            .filter(|c| c.is_complete())
            .collect();
        completed.sort_by(|a, b| match (b.completed_at(), a.completed_at()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(completed)
    }

    async fn fetch_by_notification_ref(
        &self,
        reference: &NotificationRef,
    ) -> Result<Option<Cycle>, PersistenceError> {
        Ok(self
            .all_cycles()
            .await?
            .into_iter()
            .find(|c| c.notification_ref() == Some(reference)))
    }
}
