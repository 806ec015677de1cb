//! Post-room membership handlers (`post:join`, `post:leave`)
//!
//! Joining a room registers the session locally and makes sure this gateway
//! process is subscribed to the post's Redis channel; the last local leave
//! drops the Redis subscription again.

use super::{parse_snowflake, HandlerResult};
use crate::connection::Connection;
use crate::protocol::RoomPayload;
use crate::server::GatewayState;
use serde_json::{json, Value};
use std::sync::Arc;

/// Handles room membership requests
pub struct RoomHandler;

impl RoomHandler {
    /// `post:join`
    pub async fn join(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: RoomPayload,
    ) -> HandlerResult<Value> {
        let post_id = parse_snowflake(&payload.post_id, "post_id")?;

        state
            .connection_manager()
            .subscribe_to_post(connection.session_id(), post_id)
            .await;

        if let Err(e) = state.event_dispatcher().subscribe_post(post_id).await {
            tracing::warn!(post_id = %post_id, error = %e, "Redis room subscription failed");
        }

        Ok(json!({ "post_id": post_id.to_string() }))
    }

    /// `post:leave`
    pub async fn leave(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: RoomPayload,
    ) -> HandlerResult<Value> {
        let post_id = parse_snowflake(&payload.post_id, "post_id")?;

        state
            .connection_manager()
            .unsubscribe_from_post(connection.session_id(), post_id)
            .await;

        // Only drop the Redis channel once no local session needs it
        if !state.connection_manager().has_post_subscribers(post_id) {
            if let Err(e) = state.event_dispatcher().unsubscribe_post(post_id).await {
                tracing::warn!(post_id = %post_id, error = %e, "Redis room unsubscription failed");
            }
        }

        Ok(json!({ "post_id": post_id.to_string() }))
    }
}
