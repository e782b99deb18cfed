//! Cycle aggregate - one instance of the recurring chore.
//!
//! A Cycle runs from creation to completion or deletion. The store owns the
//! record's lifetime; the gateway refs it carries are weak handles into
//! systems that own their own side-state.

use crate::domain::foundation::{CycleId, NotificationRef, ReminderRef, Timestamp};

use super::CycleStatus;

/// The Cycle aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    id: CycleId,
    created_at: Timestamp,
    scheduled_at: Timestamp,
    completed_at: Option<Timestamp>,
    notification_ref: Option<NotificationRef>,
    reminder_ref: Option<ReminderRef>,
}

impl Cycle {
    /// Creates a new scheduled cycle.
    pub fn new(
        created_at: Timestamp,
        scheduled_at: Timestamp,
        notification_ref: Option<NotificationRef>,
        reminder_ref: Option<ReminderRef>,
    ) -> Self {
        Self {
            id: CycleId::new(),
            created_at,
            scheduled_at,
            completed_at: None,
            notification_ref,
            reminder_ref,
        }
    }

    /// Reconstitutes a cycle from persisted data.
    ///
    /// Used by store implementations to rebuild domain objects from
    /// records; assigns no new identifier.
    pub fn reconstitute(
        id: CycleId,
        created_at: Timestamp,
        scheduled_at: Timestamp,
        completed_at: Option<Timestamp>,
        notification_ref: Option<NotificationRef>,
        reminder_ref: Option<ReminderRef>,
    ) -> Self {
        Self {
            id,
            created_at,
            scheduled_at,
            completed_at,
            notification_ref,
            reminder_ref,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns the cycle ID.
    pub fn id(&self) -> CycleId {
        self.id
    }

    /// Returns when this cycle was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the chore is due.
    pub fn scheduled_at(&self) -> Timestamp {
        self.scheduled_at
    }

    /// Returns when the chore was done, if it has been.
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Returns the linked notification handle, if any.
    pub fn notification_ref(&self) -> Option<&NotificationRef> {
        self.notification_ref.as_ref()
    }

    /// Returns the linked reminder handle, if any.
    pub fn reminder_ref(&self) -> Option<&ReminderRef> {
        self.reminder_ref.as_ref()
    }

    /// Returns true once a completion date is recorded.
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Classifies this cycle relative to `now`.
    pub fn status(&self, now: Timestamp) -> CycleStatus {
        CycleStatus::classify(now, self.scheduled_at, self.completed_at)
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Records the completion date.
    pub fn mark_complete(&mut self, completed_at: Timestamp) {
        self.completed_at = Some(completed_at);
    }

    /// Points this cycle at a newly scheduled notification.
    ///
    /// Used when a "remind me tomorrow" action replaces the fired alert.
    pub fn relink_notification(&mut self, reference: NotificationRef) {
        self.notification_ref = Some(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled_cycle() -> Cycle {
        let created_at = Timestamp::from_unix_secs(1_700_000_000);
        Cycle::new(created_at, created_at.plus_secs(2 * 86_400), None, None)
    }

    #[test]
    fn new_cycle_is_not_complete() {
        let cycle = scheduled_cycle();
        assert!(!cycle.is_complete());
        assert!(cycle.completed_at().is_none());
    }

    #[test]
    fn new_cycle_assigns_unique_ids() {
        assert_ne!(scheduled_cycle().id(), scheduled_cycle().id());
    }

    #[test]
    fn new_cycle_carries_channel_refs() {
        let created_at = Timestamp::from_unix_secs(1_700_000_000);
        let cycle = Cycle::new(
            created_at,
            created_at.plus_secs(86_400),
            Some(NotificationRef::new("n-1")),
            Some(ReminderRef::new("r-1")),
        );

        assert_eq!(cycle.notification_ref().unwrap().as_str(), "n-1");
        assert_eq!(cycle.reminder_ref().unwrap().as_str(), "r-1");
    }

    #[test]
    fn mark_complete_records_date() {
        let mut cycle = scheduled_cycle();
        let done = cycle.scheduled_at().plus_secs(100);

        cycle.mark_complete(done);

        assert!(cycle.is_complete());
        assert_eq!(cycle.completed_at(), Some(done));
        assert_eq!(cycle.status(done), CycleStatus::Completed);
    }

    #[test]
    fn relink_notification_replaces_handle() {
        let mut cycle = scheduled_cycle();
        assert!(cycle.notification_ref().is_none());

        cycle.relink_notification(NotificationRef::new("n-2"));

        assert_eq!(cycle.notification_ref().unwrap().as_str(), "n-2");
    }

    #[test]
    fn reconstitute_preserves_all_fields() {
        let id = CycleId::new();
        let created_at = Timestamp::from_unix_secs(1_700_000_000);
        let scheduled_at = created_at.plus_secs(86_400);
        let completed_at = Some(scheduled_at.plus_secs(60));

        let cycle = Cycle::reconstitute(
            id,
            created_at,
            scheduled_at,
            completed_at,
            Some(NotificationRef::new("n-3")),
            None,
        );

        assert_eq!(cycle.id(), id);
        assert_eq!(cycle.created_at(), created_at);
        assert_eq!(cycle.scheduled_at(), scheduled_at);
        assert_eq!(cycle.completed_at(), completed_at);
        assert_eq!(cycle.notification_ref().unwrap().as_str(), "n-3");
        assert!(cycle.reminder_ref().is_none());
    }

    #[test]
    fn status_reflects_clock() {
        let cycle = scheduled_cycle();
        let due_at = cycle.scheduled_at();

        assert_eq!(
            cycle.status(due_at.plus_secs(-60)),
            CycleStatus::Scheduled
        );
        assert_eq!(cycle.status(due_at), CycleStatus::Due);
        assert_eq!(cycle.status(due_at.plus_secs(3600)), CycleStatus::Overdue);
    }
}
