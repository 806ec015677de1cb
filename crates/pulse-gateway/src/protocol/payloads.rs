//! Client payload definitions
//!
//! Defines the payload structures for client-to-server messages. Request
//! payloads reuse the service-layer request DTOs where shapes coincide;
//! the ones here exist because socket frames carry ids in the payload
//! rather than in a URL path.

use serde::{Deserialize, Serialize};

/// Payload for op 10 (Hello)
///
/// Sent by the server immediately after connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval: u64,
}

impl HelloPayload {
    /// Default heartbeat interval (45 seconds)
    pub const DEFAULT_HEARTBEAT_INTERVAL: u64 = 45_000;

    /// Create a new Hello payload with default interval
    #[must_use]
    pub fn new() -> Self {
        Self {
            heartbeat_interval: Self::DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    /// Create a Hello payload with custom interval
    #[must_use]
    pub fn with_interval(heartbeat_interval: u64) -> Self {
        Self { heartbeat_interval }
    }
}

impl Default for HelloPayload {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload for op 2 (Identify)
///
/// Sent by the client to authenticate the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyPayload {
    /// Authentication token (Bearer token)
    pub token: String,
}

/// Payload for `post:join` and `post:leave` requests
#[derive(Debug, Clone, Deserialize)]
pub struct RoomPayload {
    pub post_id: String,
}

/// Payload for `reaction:upsert` requests
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionUpsertPayload {
    pub post_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Payload for `reaction:remove` requests
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRemovePayload {
    pub post_id: String,
}

/// Payload for `comment:create` requests
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreatePayload {
    pub post_id: String,
    pub content: String,
    pub media: Option<String>,
    pub parent_id: Option<String>,
}

/// Payload for `comment:update` requests
#[derive(Debug, Clone, Deserialize)]
pub struct CommentUpdatePayload {
    pub comment_id: String,
    pub content: String,
}

/// Payload for `comment:delete` requests
#[derive(Debug, Clone, Deserialize)]
pub struct CommentDeletePayload {
    pub comment_id: String,
}

/// Payload for `comment:list` requests
#[derive(Debug, Clone, Deserialize)]
pub struct CommentListPayload {
    pub post_id: String,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_payload_renames_type() {
        let payload: ReactionUpsertPayload =
            serde_json::from_str(r#"{"post_id":"5","type":"wow"}"#).unwrap();
        assert_eq!(payload.post_id, "5");
        assert_eq!(payload.kind, "wow");
    }

    #[test]
    fn test_comment_payload_optionals() {
        let payload: CommentCreatePayload =
            serde_json::from_str(r#"{"post_id":"5","content":"hi"}"#).unwrap();
        assert!(payload.media.is_none());
        assert!(payload.parent_id.is_none());
    }
}
