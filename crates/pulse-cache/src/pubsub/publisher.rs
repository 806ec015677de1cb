//! Redis Pub/Sub publisher.
//!
//! Publishes events to Redis channels for distribution to WebSocket clients.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "REACTION_UPDATE", "COMMENT_CREATE")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
    /// Optional target information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<EventTarget>,
}

/// Target information for event routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTarget {
    /// Post ID (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    /// User IDs to exclude from receiving this event (the actor already got
    /// the result over its acknowledgement)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exclude_users: Vec<String>,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            target: None,
        }
    }

    /// Add target information
    #[must_use]
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl EventTarget {
    /// Create an empty target
    #[must_use]
    pub fn empty() -> Self {
        Self {
            post_id: None,
            exclude_users: Vec::new(),
        }
    }

    /// Set post ID
    #[must_use]
    pub fn with_post(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }

    /// Exclude a user from delivery
    #[must_use]
    pub fn excluding_user(mut self, user_id: impl Into<String>) -> Self {
        self.exclude_users.push(user_id.into());
        self
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a raw message to a channel
    pub async fn publish_raw(&self, channel: &PubSubChannel, message: &str) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();

        let receivers: u32 = conn.publish(&channel_name, message).await?;

        tracing::debug!(
            channel = %channel_name,
            receivers = receivers,
            "Published raw message"
        );

        Ok(receivers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = PubSubEvent::new(
            "REACTION_UPDATE",
            serde_json::json!({"post_id": "1", "likes_count": 3}),
        );
        let json = event.to_json().unwrap();
        assert!(json.contains("REACTION_UPDATE"));
        assert!(json.contains("likes_count"));
        // No target: the field is omitted entirely
        assert!(!json.contains("target"));
    }

    #[test]
    fn test_event_with_target() {
        let event = PubSubEvent::new("COMMENT_CREATE", serde_json::json!({}))
            .with_target(EventTarget::empty().with_post("42").excluding_user("7"));

        let json = event.to_json().unwrap();
        let parsed: PubSubEvent = serde_json::from_str(&json).unwrap();
        let target = parsed.target.unwrap();
        assert_eq!(target.post_id.as_deref(), Some("42"));
        assert_eq!(target.exclude_users, vec!["7".to_string()]);
    }
}
