//! Cycle command handlers.
//!
//! One handler per user-facing operation, each composing the scheduling
//! engine, the cycle store, and the two best-effort gateways. Store
//! failures propagate; gateway failures are reported and tolerated.

mod add_cycle;
mod delete_cycle;
mod mark_complete;
mod snooze_notification;

pub use add_cycle::{AddCycleCommand, AddCycleError, AddCycleHandler, AddCycleResult};
pub use delete_cycle::{
    DeleteCycleCommand, DeleteCycleError, DeleteCycleHandler, DeleteCycleResult,
};
pub use mark_complete::{
    MarkCompleteCommand, MarkCompleteError, MarkCompleteHandler, MarkCompleteResult,
};
pub use snooze_notification::{
    SnoozeNotificationCommand, SnoozeNotificationError, SnoozeNotificationHandler,
    SnoozeNotificationResult,
};

use crate::ports::GatewayError;

/// What happened to one best-effort channel during an operation.
///
/// `Failed` is a reported terminal state, not an error: the durable record
/// exists either way.
#[derive(Debug, Clone)]
pub enum ChannelOutcome<R> {
    /// The channel is disabled in settings; the gateway was never called.
    Disabled,
    /// The gateway accepted the request and returned a handle.
    Linked(R),
    /// The gateway failed; the cycle proceeds without this channel.
    Failed(GatewayError),
}

impl<R> ChannelOutcome<R> {
    /// The gateway handle, when one was linked.
    pub fn reference(&self) -> Option<&R> {
        match self {
            ChannelOutcome::Linked(reference) => Some(reference),
            _ => None,
        }
    }

    /// True when the gateway was attempted and failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, ChannelOutcome::Failed(_))
    }
}
