//! Reaction request handlers (`reaction:upsert`, `reaction:remove`)
//!
//! Thin translation onto the same `ReactionService` the HTTP adapter uses;
//! toggle semantics cannot diverge between the two paths.

use super::{parse_snowflake, HandlerResult};
use crate::server::GatewayState;
use pulse_core::Snowflake;
use pulse_service::ReactionService;
use serde_json::Value;

use crate::protocol::{ReactionRemovePayload, ReactionUpsertPayload};

/// Handles reaction requests
pub struct ReactionRequestHandler;

impl ReactionRequestHandler {
    /// `reaction:upsert` - create, switch, or toggle off
    pub async fn upsert(
        state: &GatewayState,
        user_id: Snowflake,
        payload: ReactionUpsertPayload,
    ) -> HandlerResult<Value> {
        let post_id = parse_snowflake(&payload.post_id, "post_id")?;

        let service = ReactionService::new(state.service_context());
        let response = service.upsert_reaction(user_id, post_id, &payload.kind).await?;

        Ok(serde_json::to_value(response).unwrap_or_default())
    }

    /// `reaction:remove` - delete the caller's reaction (no-op without one)
    pub async fn remove(
        state: &GatewayState,
        user_id: Snowflake,
        payload: ReactionRemovePayload,
    ) -> HandlerResult<Value> {
        let post_id = parse_snowflake(&payload.post_id, "post_id")?;

        let service = ReactionService::new(state.service_context());
        let response = service.remove_reaction(user_id, post_id).await?;

        Ok(serde_json::to_value(response).unwrap_or_default())
    }
}
