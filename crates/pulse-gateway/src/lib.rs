//! # pulse-gateway
//!
//! WebSocket adapter for real-time reactions and comments.
//!
//! Clients identify with a bearer token, join per-post rooms, and submit the
//! same operations the HTTP adapter offers as `Request` frames; every
//! request is answered with an `Ack` frame, and committed changes fan out to
//! the room's other subscribers as `Dispatch` frames via Redis pub/sub.

pub mod broadcast;
pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod server;
