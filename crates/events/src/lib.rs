//! Notification system for campus-os
//!
//! Fire-and-forget notifications emitted by the orchestration layer;
//! consumers (mailers, websocket fan-out) subscribe on the bus.

mod bus;
mod types;

pub use bus::NotificationBus;
pub use types::*;
