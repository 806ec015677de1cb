//! WebSocket connection management
//!
//! The connection registry is the explicit session-registry component:
//! populated on connect, purged on disconnect, injected into the gateway
//! state rather than held as ambient process globals.

mod connection;
mod manager;

pub use connection::{Connection, ConnectionState};
pub use manager::ConnectionManager;
