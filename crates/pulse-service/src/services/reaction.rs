//! Reaction service
//!
//! The reaction ledger engine's front door: validates the requested kind,
//! runs the atomic apply/clear through the repository, shapes the response,
//! and publishes the updated aggregate to the post's room. Both transport
//! adapters call these two methods and nothing else.

use pulse_cache::{EventTarget, PubSubChannel, PubSubEvent};
use pulse_core::{ReactionKind, Snowflake};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::ReactionUpdateResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::EVENT_REACTION_UPDATE;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a reaction: create it, switch its kind, or toggle it off when
    /// the same kind is re-requested.
    #[instrument(skip(self))]
    pub async fn upsert_reaction(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
        kind: &str,
    ) -> ServiceResult<ReactionUpdateResponse> {
        // Unknown kinds fail deterministically before any storage work
        let kind: ReactionKind = kind.parse()?;

        let outcome = self.ctx.reaction_repo().apply(post_id, user_id, kind).await?;
        let response = ReactionUpdateResponse::from(&outcome);

        info!(
            post_id = %post_id,
            user_id = %user_id,
            transition = ?outcome.transition,
            likes_count = response.likes_count,
            "Reaction applied"
        );

        self.broadcast_aggregate(post_id, user_id, &response).await;

        Ok(response)
    }

    /// Remove the caller's reaction; a no-op (not an error) when none exists
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<ReactionUpdateResponse> {
        let outcome = self.ctx.reaction_repo().clear(post_id, user_id).await?;

        let response = ReactionUpdateResponse {
            post_id: post_id.to_string(),
            reactions: outcome.aggregate.reactions,
            likes_count: outcome.aggregate.likes_count,
            my_reaction: None,
        };

        info!(
            post_id = %post_id,
            user_id = %user_id,
            removed = ?outcome.removed,
            "Reaction removed"
        );

        // A no-op removal still acks the caller, but viewers only hear about
        // actual changes
        if outcome.removed.is_some() {
            self.broadcast_aggregate(post_id, user_id, &response).await;
        }

        Ok(response)
    }

    /// Publish the fresh aggregate to the post's room, excluding the actor
    /// (the actor already has the result in hand)
    async fn broadcast_aggregate(
        &self,
        post_id: Snowflake,
        actor_id: Snowflake,
        response: &ReactionUpdateResponse,
    ) {
        let event = PubSubEvent::new(
            EVENT_REACTION_UPDATE,
            json!({
                "post_id": response.post_id,
                "reactions": response.reactions,
                "likes_count": response.likes_count,
            }),
        )
        .with_target(
            EventTarget::empty()
                .with_post(post_id.to_string())
                .excluding_user(actor_id.to_string()),
        );

        self.ctx
            .publisher()
            .publish(&PubSubChannel::post(post_id), &event)
            .await
            .ok();
    }
}
