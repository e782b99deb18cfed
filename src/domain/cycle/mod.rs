//! Cycle module - the chore cycle aggregate and its derived status.

mod aggregate;
mod status;

pub use aggregate::Cycle;
pub use status::{CycleStatus, DUE_GRACE_SECS};
