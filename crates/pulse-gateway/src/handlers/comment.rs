//! Comment request handlers (`comment:create/update/delete/list`)

use super::{parse_snowflake, HandlerResult};
use crate::server::GatewayState;
use pulse_core::Snowflake;
use pulse_service::CommentService;
use serde_json::Value;

use crate::protocol::{
    CommentCreatePayload, CommentDeletePayload, CommentListPayload, CommentUpdatePayload,
};

/// Handles comment requests
pub struct CommentRequestHandler;

impl CommentRequestHandler {
    /// `comment:create` - insert the fact and bump the counter atomically
    pub async fn create(
        state: &GatewayState,
        user_id: Snowflake,
        payload: CommentCreatePayload,
    ) -> HandlerResult<Value> {
        let post_id = parse_snowflake(&payload.post_id, "post_id")?;
        let parent_id = payload
            .parent_id
            .as_deref()
            .map(|raw| parse_snowflake(raw, "parent_id"))
            .transpose()?;

        let service = CommentService::new(state.service_context());
        let response = service
            .create_comment(user_id, post_id, &payload.content, payload.media, parent_id)
            .await?;

        Ok(serde_json::to_value(response).unwrap_or_default())
    }

    /// `comment:update` - author-only content edit
    pub async fn update(
        state: &GatewayState,
        user_id: Snowflake,
        payload: CommentUpdatePayload,
    ) -> HandlerResult<Value> {
        let comment_id = parse_snowflake(&payload.comment_id, "comment_id")?;

        let service = CommentService::new(state.service_context());
        let response = service
            .update_comment(user_id, comment_id, &payload.content)
            .await?;

        Ok(serde_json::json!({ "comment": response }))
    }

    /// `comment:delete` - author-only; non-matches decrement nothing
    pub async fn delete(
        state: &GatewayState,
        user_id: Snowflake,
        payload: CommentDeletePayload,
    ) -> HandlerResult<Value> {
        let comment_id = parse_snowflake(&payload.comment_id, "comment_id")?;

        let service = CommentService::new(state.service_context());
        let response = service.delete_comment(user_id, comment_id).await?;

        Ok(serde_json::to_value(response).unwrap_or_default())
    }

    /// `comment:list` - paginated read, newest first
    pub async fn list(state: &GatewayState, payload: CommentListPayload) -> HandlerResult<Value> {
        let post_id = parse_snowflake(&payload.post_id, "post_id")?;

        let service = CommentService::new(state.service_context());
        let response = service
            .list_comments(post_id, payload.page, payload.limit)
            .await?;

        Ok(serde_json::to_value(response).unwrap_or_default())
    }
}
