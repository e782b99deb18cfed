//! Cycle store port - durable CRUD over cycle records.
//!
//! The store is the durability boundary of the whole system: any I/O
//! failure here is a [`PersistenceError`] that callers must surface, not
//! swallow. Every mutation is transactional - it either fully commits or
//! leaves the record set unchanged.

use async_trait::async_trait;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleId, NotificationRef};

/// Store I/O failure. Fatal to the triggering call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PersistenceError {
    #[error("cycle not found: {0}")]
    NotFound(CycleId),

    #[error("storage I/O failure: {0}")]
    Io(String),

    #[error("failed to encode record: {0}")]
    Serialization(String),

    #[error("failed to decode record: {0}")]
    Deserialization(String),

    #[error("schema migration failed: {0}")]
    Migration(String),
}

/// Port for persisting and querying cycle records.
///
/// Implementations serialize all mutations through a single logical
/// writer; callers need no additional locking.
#[async_trait]
pub trait CycleStore: Send + Sync {
    /// Persists a new cycle.
    ///
    /// # Errors
    ///
    /// `PersistenceError` on I/O failure.
    async fn add(&self, cycle: &Cycle) -> Result<CycleId, PersistenceError>;

    /// Rewrites an existing cycle.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record carries the cycle's id
    /// - `PersistenceError` on I/O failure
    async fn update(&self, cycle: &Cycle) -> Result<(), PersistenceError>;

    /// Removes a cycle.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record carries the id
    /// - `PersistenceError` on I/O failure
    async fn delete(&self, id: CycleId) -> Result<(), PersistenceError>;

    /// Looks up a cycle by id.
    async fn fetch_by_id(&self, id: CycleId) -> Result<Option<Cycle>, PersistenceError>;

    /// Returns cycles ordered by `created_at` descending, newest first.
    async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<Cycle>, PersistenceError>;

    /// Returns the non-completed cycle with the earliest `scheduled_at`,
    /// if one exists.
    async fn fetch_active(&self) -> Result<Option<Cycle>, PersistenceError>;

    /// Returns completed cycles ordered by `completed_at` descending;
    /// records missing a completion date sort last.
    async fn fetch_completed(&self) -> Result<Vec<Cycle>, PersistenceError>;

    /// Correlates an inbound notification action back to its cycle.
    async fn fetch_by_notification_ref(
        &self,
        reference: &NotificationRef,
    ) -> Result<Option<Cycle>, PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn cycle_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CycleStore) {}
    }

    #[test]
    fn persistence_error_displays_cycle_id() {
        let id = CycleId::new();
        let err = PersistenceError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn persistence_error_io_displays_cause() {
        let err = PersistenceError::Io("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }
}
