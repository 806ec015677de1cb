//! Incoming message handlers
//!
//! Protocol plumbing (Identify, Heartbeat) either succeeds silently or
//! closes the connection; domain `Request` frames are always answered with
//! an `Ack` carrying `{ok: true, ...}` or `{ok: false, code, message}` - a
//! failed mutation never masquerades as success and never kills the socket.

mod comment;
mod error;
mod heartbeat;
mod identify;
mod reaction;
mod room;

pub use comment::CommentRequestHandler;
pub use error::{HandlerError, HandlerResult};
pub use heartbeat::HeartbeatHandler;
pub use identify::IdentifyHandler;
pub use reaction::ReactionRequestHandler;
pub use room::RoomHandler;

use crate::connection::Connection;
use crate::protocol::{CloseCode, GatewayMessage, OpCode, RequestFrame};
use crate::server::GatewayState;
use pulse_core::Snowflake;
use serde_json::{json, Value};
use std::sync::Arc;

/// Parse a payload id field, failing as an invalid payload
pub(crate) fn parse_snowflake(raw: &str, field: &str) -> Result<Snowflake, HandlerError> {
    raw.parse()
        .map_err(|_| HandlerError::InvalidPayload(format!("invalid {field}")))
}

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle an incoming client message
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: GatewayMessage,
    ) -> HandlerResult<Option<CloseCode>> {
        // Validate that this is a client-sendable op code
        if !message.op.is_client_op() {
            tracing::warn!(
                session_id = %connection.session_id(),
                op = %message.op,
                "Received server-only op code from client"
            );
            return Ok(Some(CloseCode::UnknownOpcode));
        }

        match message.op {
            OpCode::Identify => {
                let payload = message.as_identify().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid Identify payload".to_string())
                })?;

                IdentifyHandler::handle(state, connection, payload).await
            }
            OpCode::Heartbeat => {
                let seq = message.as_heartbeat_seq().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid Heartbeat payload".to_string())
                })?;

                HeartbeatHandler::handle(connection, seq).await
            }
            OpCode::Request => {
                let frame = message.as_request().ok_or_else(|| {
                    HandlerError::InvalidPayload("Request frame without a name".to_string())
                })?;

                // Every domain operation requires a resolved caller identity
                let Some(user_id) = connection.user_id().await else {
                    return Ok(Some(CloseCode::NotAuthenticated));
                };

                let ack_body =
                    match Self::handle_request(state, connection, user_id, &frame).await {
                        Ok(data) => ack_success(data),
                        Err(e) => {
                            tracing::debug!(
                                session_id = %connection.session_id(),
                                request = %frame.name,
                                error = %e,
                                "Request failed"
                            );
                            json!({
                                "ok": false,
                                "code": e.ack_code(),
                                "message": e.to_string(),
                            })
                        }
                    };

                connection
                    .send(GatewayMessage::ack(frame.nonce.clone(), ack_body))
                    .await
                    .map_err(|e| HandlerError::Internal(format!("Failed to send ack: {e}")))?;

                Ok(None)
            }
            // Unreachable due to the is_client_op check
            _ => {
                tracing::error!(op = %message.op, "Unhandled client op code");
                Ok(Some(CloseCode::UnknownOpcode))
            }
        }
    }

    /// Route a Request frame by operation name
    async fn handle_request(
        state: &GatewayState,
        connection: &Arc<Connection>,
        user_id: Snowflake,
        frame: &RequestFrame,
    ) -> HandlerResult<Value> {
        match frame.name.as_str() {
            "post:join" => RoomHandler::join(state, connection, parse(frame)?).await,
            "post:leave" => RoomHandler::leave(state, connection, parse(frame)?).await,
            "reaction:upsert" => {
                ReactionRequestHandler::upsert(state, user_id, parse(frame)?).await
            }
            "reaction:remove" => {
                ReactionRequestHandler::remove(state, user_id, parse(frame)?).await
            }
            "comment:create" => CommentRequestHandler::create(state, user_id, parse(frame)?).await,
            "comment:update" => CommentRequestHandler::update(state, user_id, parse(frame)?).await,
            "comment:delete" => CommentRequestHandler::delete(state, user_id, parse(frame)?).await,
            "comment:list" => CommentRequestHandler::list(state, parse(frame)?).await,
            other => Err(HandlerError::InvalidPayload(format!(
                "unknown request: {other}"
            ))),
        }
    }
}

/// Deserialize a request frame's payload
fn parse<P: serde::de::DeserializeOwned>(frame: &RequestFrame) -> Result<P, HandlerError> {
    serde_json::from_value(frame.data.clone())
        .map_err(|e| HandlerError::InvalidPayload(e.to_string()))
}

/// Merge `ok: true` into an ack payload
fn ack_success(data: Value) -> Value {
    match data {
        Value::Object(mut map) => {
            map.insert("ok".to_string(), Value::Bool(true));
            Value::Object(map)
        }
        other => json!({ "ok": true, "data": other }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_success_merges_flag() {
        let body = ack_success(json!({"likes_count": 3}));
        assert_eq!(body["ok"], true);
        assert_eq!(body["likes_count"], 3);
    }

    #[test]
    fn test_ack_success_wraps_non_objects() {
        let body = ack_success(json!([1, 2]));
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"], json!([1, 2]));
    }

    #[test]
    fn test_parse_snowflake_rejects_garbage() {
        assert!(parse_snowflake("123", "post_id").is_ok());
        assert!(parse_snowflake("abc", "post_id").is_err());
    }
}
