//! Outgoing gateway events

mod event_types;
mod payloads;

pub use event_types::GatewayEventType;
pub use payloads::{ReadyPayload, UserPayload};
