//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CycleStore` - durable CRUD over cycle records (the durability
//!   boundary; its errors always propagate)
//! - `NotificationGateway` / `ReminderGateway` - the two best-effort
//!   reminder channels
//! - `SettingsStore` - persisted key/value chore configuration
//! - `SchedulingEngine` - due-date arithmetic behind a testable seam

mod cycle_store;
mod gateway;
mod notification_gateway;
mod reminder_gateway;
mod scheduling_engine;
mod settings_store;

pub use cycle_store::{CycleStore, PersistenceError};
pub use gateway::GatewayError;
pub use notification_gateway::NotificationGateway;
pub use reminder_gateway::ReminderGateway;
pub use scheduling_engine::SchedulingEngine;
pub use settings_store::{SettingsStore, SettingsStoreError};
