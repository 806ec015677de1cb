//! Reaction handlers
//!
//! Endpoints over the reaction ledger engine. The three-way
//! create/switch/toggle-off semantics live entirely in the service; these
//! handlers only translate shapes.

use axum::extract::{Path, State};
use pulse_service::{ReactionService, ReactionUpdateResponse, UpsertReactionRequest};

use crate::extractors::{AuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Success};
use crate::state::AppState;

/// Apply a reaction (create, switch kind, or toggle off)
///
/// POST /reactions/{post_id} with body `{"type": "like"}`
pub async fn upsert_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(body): ValidatedJson<UpsertReactionRequest>,
) -> ApiResult<Success<ReactionUpdateResponse>> {
    let post_id = path.post_id()?;

    let service = ReactionService::new(state.service_context());
    let response = service
        .upsert_reaction(auth.user_id, post_id, &body.kind)
        .await?;
    Ok(Success(response))
}

/// Remove own reaction (no-op when none exists)
///
/// DELETE /reactions/{post_id}
pub async fn remove_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Success<ReactionUpdateResponse>> {
    let post_id = path.post_id()?;

    let service = ReactionService::new(state.service_context());
    let response = service.remove_reaction(auth.user_id, post_id).await?;
    Ok(Success(response))
}
