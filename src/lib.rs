//! Chore Reminder - cycle lifecycle engine for a single recurring chore.
//!
//! Tracks when the chore was last done and when it is next due, and
//! reminds the owner through two independent, unreliable channels: timed
//! notifications and a task-list entry. The durable cycle record always
//! wins; channel failures are reported, never fatal. The persisted record
//! format is migrated across schema versions at store open.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
