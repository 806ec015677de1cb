//! Gateway event types
//!
//! Defines all event type names for dispatch messages. The domain events
//! match the names published by the services over Redis; the dispatcher
//! relays them verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway event types
///
/// These are the event names sent in the `t` field of dispatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventType {
    // Connection events
    /// Sent after successful Identify
    Ready,

    // Post-room events
    /// A post's reaction aggregate changed
    ReactionUpdate,
    /// A comment was created on a post
    CommentCreate,
    /// A comment was deleted from a post
    CommentDelete,
}

impl GatewayEventType {
    /// Get the event name string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::ReactionUpdate => "REACTION_UPDATE",
            Self::CommentCreate => "COMMENT_CREATE",
            Self::CommentDelete => "COMMENT_DELETE",
        }
    }

    /// Parse an event name string
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "READY" => Some(Self::Ready),
            "REACTION_UPDATE" => Some(Self::ReactionUpdate),
            "COMMENT_CREATE" => Some(Self::CommentCreate),
            "COMMENT_DELETE" => Some(Self::CommentDelete),
            _ => None,
        }
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
