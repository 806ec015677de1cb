//! Gateway message format
//!
//! Defines the structure for all WebSocket messages.

use super::{HelloPayload, IdentifyPayload, OpCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway message format
///
/// All messages sent over the WebSocket connection follow this format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: OpCode,

    /// Event name (for op=0 Dispatch) or request name (for op=3 Request)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Request nonce, echoed back on the matching Ack (op=3/op=4)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// Sequence number (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

/// A parsed client Request frame
#[derive(Debug, Clone)]
pub struct RequestFrame {
    /// Operation name, e.g. `reaction:upsert`
    pub name: String,
    /// Client-chosen correlation id, echoed on the Ack
    pub nonce: Option<String>,
    /// Operation payload
    pub data: Value,
}

impl GatewayMessage {
    // === Server Messages ===

    /// Create a Dispatch message (op=0)
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, sequence: u64, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch,
            t: Some(event_type.into()),
            n: None,
            s: Some(sequence),
            d: Some(data),
        }
    }

    /// Create a Hello message (op=10)
    #[must_use]
    pub fn hello(payload: HelloPayload) -> Self {
        Self {
            op: OpCode::Hello,
            t: None,
            n: None,
            s: None,
            d: Some(serde_json::to_value(payload).unwrap_or_default()),
        }
    }

    /// Create a Heartbeat ACK message (op=11)
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self {
            op: OpCode::HeartbeatAck,
            t: None,
            n: None,
            s: None,
            d: None,
        }
    }

    /// Create an Ack message (op=4) answering a Request
    #[must_use]
    pub fn ack(nonce: Option<String>, data: Value) -> Self {
        Self {
            op: OpCode::Ack,
            t: None,
            n: nonce,
            s: None,
            d: Some(data),
        }
    }

    // === Parsing Client Messages ===

    /// Try to parse as an Identify payload (op=2)
    pub fn as_identify(&self) -> Option<IdentifyPayload> {
        if self.op != OpCode::Identify {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as a Request frame (op=3); the `t` field names the
    /// operation
    pub fn as_request(&self) -> Option<RequestFrame> {
        if self.op != OpCode::Request {
            return None;
        }
        let name = self.t.clone()?;
        Some(RequestFrame {
            name,
            nonce: self.n.clone(),
            data: self.d.clone().unwrap_or(Value::Null),
        })
    }

    /// Try to parse the heartbeat sequence number (op=1)
    pub fn as_heartbeat_seq(&self) -> Option<Option<u64>> {
        if self.op != OpCode::Heartbeat {
            return None;
        }
        Some(self.d.as_ref().and_then(|d| d.as_u64()))
    }

    // === Utilities ===

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(t) = &self.t {
            write!(f, "GatewayMessage(op={}, t={}", self.op, t)?;
            if let Some(s) = self.s {
                write!(f, ", s={s}")?;
            }
            write!(f, ")")
        } else {
            write!(f, "GatewayMessage(op={})", self.op)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_message() {
        let msg = GatewayMessage::dispatch(
            "REACTION_UPDATE",
            42,
            json!({"post_id": "12345", "likes_count": 7}),
        );

        assert_eq!(msg.op, OpCode::Dispatch);
        assert_eq!(msg.t, Some("REACTION_UPDATE".to_string()));
        assert_eq!(msg.s, Some(42));
        assert!(msg.d.is_some());
    }

    #[test]
    fn test_hello_message() {
        let msg = GatewayMessage::hello(HelloPayload::new());
        assert_eq!(msg.op, OpCode::Hello);

        let json = msg.to_json().unwrap();
        assert!(json.contains("45000"));
    }

    #[test]
    fn test_ack_echoes_nonce() {
        let msg = GatewayMessage::ack(Some("req-7".to_string()), json!({"ok": true}));
        assert_eq!(msg.op, OpCode::Ack);
        assert_eq!(msg.n, Some("req-7".to_string()));

        let json = msg.to_json().unwrap();
        let parsed = GatewayMessage::from_json(&json).unwrap();
        assert_eq!(parsed.n, Some("req-7".to_string()));
    }

    #[test]
    fn test_parse_request() {
        let msg = GatewayMessage {
            op: OpCode::Request,
            t: Some("reaction:upsert".to_string()),
            n: Some("1".to_string()),
            s: None,
            d: Some(json!({"post_id": "9", "type": "like"})),
        };

        let request = msg.as_request().unwrap();
        assert_eq!(request.name, "reaction:upsert");
        assert_eq!(request.nonce, Some("1".to_string()));
        assert_eq!(request.data["type"], "like");
    }

    #[test]
    fn test_request_without_name_is_rejected() {
        let msg = GatewayMessage {
            op: OpCode::Request,
            t: None,
            n: None,
            s: None,
            d: None,
        };
        assert!(msg.as_request().is_none());
    }

    #[test]
    fn test_parse_identify() {
        let msg = GatewayMessage {
            op: OpCode::Identify,
            t: None,
            n: None,
            s: None,
            d: Some(json!({"token": "Bearer xyz"})),
        };

        let identify = msg.as_identify().unwrap();
        assert_eq!(identify.token, "Bearer xyz");
    }

    #[test]
    fn test_parse_heartbeat() {
        let msg = GatewayMessage {
            op: OpCode::Heartbeat,
            t: None,
            n: None,
            s: None,
            d: Some(Value::Number(41.into())),
        };

        let seq = msg.as_heartbeat_seq().unwrap();
        assert_eq!(seq, Some(41));
    }

    #[test]
    fn test_message_roundtrip() {
        let msg = GatewayMessage::dispatch("READY", 1, json!({"v": 1}));
        let json = msg.to_json().unwrap();
        let parsed = GatewayMessage::from_json(&json).unwrap();

        assert_eq!(parsed.op, msg.op);
        assert_eq!(parsed.t, msg.t);
        assert_eq!(parsed.s, msg.s);
    }
}
