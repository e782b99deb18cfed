//! Alerting vocabulary shared with the two reminder channels.
//!
//! Notification payloads carry the due instant plus an occurrence counter;
//! the counter drives the escalating alert wording. Reminder-list entries
//! are a single fixed-title task with minute-granularity due components and
//! one alarm at the due instant.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Notification category handled by the app.
pub const CATEGORY_IDENTIFIER: &str = "SCHEDULED_CHORE";

/// Notification action: mark the owning cycle complete.
pub const MARK_COMPLETE_ACTION: &str = "MARK_COMPLETE";

/// Notification action: snooze the alert by one day.
pub const REMIND_LATER_ACTION: &str = "REMIND_LATER_1_DAY";

/// Payload key for the due instant.
pub const PAYLOAD_DUE_DATE_KEY: &str = "DUE_DATE";

/// Payload key for the occurrence counter.
pub const PAYLOAD_OCCURRENCE_KEY: &str = "OCCURRENCE";

/// Fixed title for the reminder-list entry.
pub const REMINDER_TITLE: &str = "Do the chore";

/// Payload of one scheduled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPayload {
    /// When the chore is due.
    pub due_at: Timestamp,
    /// How many alerts have fired for the same due cycle, starting at 1.
    pub occurrence: u32,
}

impl AlertPayload {
    /// Creates a payload; occurrences below 1 are clamped to 1.
    pub fn new(due_at: Timestamp, occurrence: u32) -> Self {
        Self {
            due_at,
            occurrence: occurrence.max(1),
        }
    }

    /// Payload for the first alert of a freshly scheduled cycle.
    pub fn first(due_at: Timestamp) -> Self {
        Self::new(due_at, 1)
    }

    /// Payload for the next alert after a "remind me tomorrow" action.
    pub fn escalated(&self, new_due_at: Timestamp) -> Self {
        Self::new(new_due_at, self.occurrence + 1)
    }

    /// Alert body text for this occurrence.
    pub fn message(&self) -> String {
        message_for_occurrence(self.occurrence)
    }
}

/// Escalating alert wording keyed on the occurrence counter.
pub fn message_for_occurrence(occurrence: u32) -> String {
    match occurrence {
        0 | 1 => "The chore is due".to_string(),
        2 => "2nd notification: The chore is due".to_string(),
        3 => "3rd notification: The chore is due".to_string(),
        _ => "The chore is way overdue".to_string(),
    }
}

/// One reminder-list entry as the reminder gateway materializes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderItem {
    /// Due components at minute granularity.
    pub due_at: Timestamp,
    /// Alarm fires at the exact due instant.
    pub alarm_at: Timestamp,
}

impl ReminderItem {
    /// Builds the entry for a due instant.
    pub fn for_due_date(due_at: Timestamp) -> Self {
        Self {
            due_at: due_at.truncated_to_minute(),
            alarm_at: due_at,
        }
    }

    /// The fixed entry title.
    pub fn title(&self) -> &'static str {
        REMINDER_TITLE
    }
}
