//! In-memory cycle store adapter.
//!
//! Backing store for tests and development. Mutations go through a single
//! write lock, matching the one-writer contract of the port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleId, NotificationRef};
use crate::ports::{CycleStore, PersistenceError};

/// In-memory cycle store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCycleStore {
    cycles: Arc<RwLock<HashMap<CycleId, Cycle>>>,
}

impl InMemoryCycleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cycles (for tests).
    pub async fn len(&self) -> usize {
        self.cycles.read().await.len()
    }

    /// True when no cycles are stored.
    pub async fn is_empty(&self) -> bool {
        self.cycles.read().await.is_empty()
    }
}

fn sorted_by_created_desc(mut cycles: Vec<Cycle>) -> Vec<Cycle> {
    cycles.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    cycles
}

#[async_trait]
impl CycleStore for InMemoryCycleStore {
    async fn add(&self, cycle: &Cycle) -> Result<CycleId, PersistenceError> {
        let mut cycles = self.cycles.write().await;
        cycles.insert(cycle.id(), cycle.clone());
        Ok(cycle.id())
    }

    async fn update(&self, cycle: &Cycle) -> Result<(), PersistenceError> {
        let mut cycles = self.cycles.write().await;
        if !cycles.contains_key(&cycle.id()) {
            return Err(PersistenceError::NotFound(cycle.id()));
        }
        cycles.insert(cycle.id(), cycle.clone());
        Ok(())
    }

    async fn delete(&self, id: CycleId) -> Result<(), PersistenceError> {
        let mut cycles = self.cycles.write().await;
        cycles
            .remove(&id)
            .map(|_| ())
            .ok_or(PersistenceError::NotFound(id))
    }

    async fn fetch_by_id(&self, id: CycleId) -> Result<Option<Cycle>, PersistenceError> {
        Ok(self.cycles.read().await.get(&id).cloned())
    }

    async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<Cycle>, PersistenceError> {
        let cycles = self.cycles.read().await;
        let mut all = sorted_by_created_desc(cycles.values().cloned().collect());
        if let Some(limit) = limit {
            all.truncate(limit);
        }
        Ok(all)
    }

    async fn fetch_active(&self) -> Result<Option<Cycle>, PersistenceError> {
        let cycles = self.cycles.read().await;
        Ok(cycles
            .values()
            .filter(|c| !c.is_complete())
            .min_by_key(|c| c.scheduled_at())
            .cloned())
    }

    async fn fetch_completed(&self) -> Result<Vec<Cycle>, PersistenceError> {
        let cycles = self.cycles.read().await;
        let mut completed: Vec<Cycle> =
            cycles.values().filter(|c| c.is_complete()).cloned().collect();
        // completed_at desc; a missing completion date sorts last.
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
        let cycles = self.cycles.read().await;
        Ok(cycles
            .values()
            .find(|c| c.notification_ref() == Some(reference))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn cycle_created_at(secs: i64) -> Cycle {
        let created_at = Timestamp::from_unix_secs(secs);
        Cycle::new(created_at, created_at.plus_secs(2 * 86_400), None, None)
    }

    #[tokio::test]
    async fn add_then_fetch_by_id() {
        let store = InMemoryCycleStore::new();
        let cycle = cycle_created_at(1_000);

        let id = store.add(&cycle).await.unwrap();
        let fetched = store.fetch_by_id(id).await.unwrap().unwrap();

        assert_eq!(fetched, cycle);
    }

    #[tokio::test]
    async fn fetch_all_orders_newest_first() {
        let store = InMemoryCycleStore::new();
        let older = cycle_created_at(1_000);
        let newer = cycle_created_at(2_000);
        store.add(&older).await.unwrap();
        store.add(&newer).await.unwrap();

        let all = store.fetch_all(None).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), newer.id());
        assert_eq!(all[1].id(), older.id());
    }

    #[tokio::test]
    async fn fetch_all_respects_limit() {
        let store = InMemoryCycleStore::new();
        for i in 0..5 {
            store.add(&cycle_created_at(i * 100)).await.unwrap();
        }

        let limited = store.fetch_all(Some(2)).await.unwrap();

        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn fetch_active_returns_earliest_scheduled_incomplete() {
        let store = InMemoryCycleStore::new();
        let created_at = Timestamp::from_unix_secs(1_000);
        let later = Cycle::new(created_at, created_at.plus_secs(7 * 86_400), None, None);
        let sooner = Cycle::new(created_at, created_at.plus_secs(86_400), None, None);
        let mut done = Cycle::new(created_at, created_at.plus_secs(3_600), None, None);
        done.mark_complete(created_at.plus_secs(3_700));

        store.add(&later).await.unwrap();
        store.add(&sooner).await.unwrap();
        store.add(&done).await.unwrap();

        let active = store.fetch_active().await.unwrap().unwrap();
        assert_eq!(active.id(), sooner.id());
    }

    #[tokio::test]
    async fn fetch_active_returns_none_when_all_complete() {
        let store = InMemoryCycleStore::new();
        let mut done = cycle_created_at(1_000);
        done.mark_complete(Timestamp::from_unix_secs(2_000));
        store.add(&done).await.unwrap();

        assert!(store.fetch_active().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_completed_orders_by_completion_desc() {
        let store = InMemoryCycleStore::new();
        let mut first = cycle_created_at(1_000);
        first.mark_complete(Timestamp::from_unix_secs(5_000));
        let mut second = cycle_created_at(2_000);
        second.mark_complete(Timestamp::from_unix_secs(9_000));
        let open = cycle_created_at(3_000);

        store.add(&first).await.unwrap();
        store.add(&second).await.unwrap();
        store.add(&open).await.unwrap();

        let completed = store.fetch_completed().await.unwrap();

        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].id(), second.id());
        assert_eq!(completed[1].id(), first.id());
    }

    #[tokio::test]
    async fn fetch_by_notification_ref_correlates() {
        let store = InMemoryCycleStore::new();
        let created_at = Timestamp::from_unix_secs(1_000);
        let cycle = Cycle::new(
            created_at,
            created_at.plus_secs(86_400),
            Some(NotificationRef::new("n-9")),
            None,
        );
        store.add(&cycle).await.unwrap();

        let found = store
            .fetch_by_notification_ref(&NotificationRef::new("n-9"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), cycle.id());

        let missing = store
            .fetch_by_notification_ref(&NotificationRef::new("other"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn update_rewrites_existing_record() {
        let store = InMemoryCycleStore::new();
        let mut cycle = cycle_created_at(1_000);
        store.add(&cycle).await.unwrap();

        cycle.mark_complete(Timestamp::from_unix_secs(9_999));
        store.update(&cycle).await.unwrap();

        let fetched = store.fetch_by_id(cycle.id()).await.unwrap().unwrap();
        assert!(fetched.is_complete());
    }

    #[tokio::test]
    async fn update_unknown_cycle_is_not_found() {
        let store = InMemoryCycleStore::new();
        let cycle = cycle_created_at(1_000);

        let result = store.update(&cycle).await;

        assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_from_all_queries() {
        let store = InMemoryCycleStore::new();
        let cycle = cycle_created_at(1_000);
        store.add(&cycle).await.unwrap();

        store.delete(cycle.id()).await.unwrap();

        assert!(store.fetch_all(None).await.unwrap().is_empty());
        assert!(store.fetch_active().await.unwrap().is_none());
        assert!(store.fetch_completed().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_cycle_is_not_found() {
        let store = InMemoryCycleStore::new();

        let result = store.delete(CycleId::new()).await;

        assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    }
}
