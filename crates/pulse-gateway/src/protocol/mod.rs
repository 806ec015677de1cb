//! Gateway wire protocol
//!
//! Opcode-framed JSON messages over the WebSocket connection.

mod close_codes;
mod messages;
mod opcodes;
mod payloads;

pub use close_codes::CloseCode;
pub use messages::{GatewayMessage, RequestFrame};
pub use opcodes::OpCode;
pub use payloads::{
    CommentCreatePayload, CommentDeletePayload, CommentListPayload, CommentUpdatePayload,
    HelloPayload, IdentifyPayload, ReactionRemovePayload, ReactionUpsertPayload, RoomPayload,
};
