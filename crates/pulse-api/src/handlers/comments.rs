//! Comment handlers
//!
//! Endpoints over the comment counter engine.

use axum::extract::{Path, State};
use pulse_service::{
    CommentCreatedResponse, CommentDeletedResponse, CommentListResponse, CommentResponse,
    CommentService, CreateCommentRequest, UpdateCommentRequest,
};

use crate::extractors::{AuthUser, CommentIdPath, PageQuery, PostIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, Success};
use crate::state::AppState;

/// Create a comment (optionally a threaded reply)
///
/// POST /comments/{post_id} with body `{content, media?, parent_id?}`
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(body): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<CommentCreatedResponse>> {
    let post_id = path.post_id()?;
    let parent_id = body
        .parent_id
        .as_deref()
        .map(|raw| {
            raw.parse()
                .map_err(|_| ApiError::invalid_path("Invalid parent_id format"))
        })
        .transpose()?;

    let service = CommentService::new(state.service_context());
    let response = service
        .create_comment(auth.user_id, post_id, &body.content, body.media, parent_id)
        .await?;
    Ok(Created(response))
}

/// Edit a comment; author-only
///
/// PATCH /comments/{comment_id} with body `{content}`
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
    ValidatedJson(body): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Success<CommentResponse>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let response = service
        .update_comment(auth.user_id, comment_id, &body.content)
        .await?;
    Ok(Success(response))
}

/// Delete a comment; author-only, 404 otherwise
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<Success<CommentDeletedResponse>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let response = service.delete_comment(auth.user_id, comment_id).await?;
    Ok(Success(response))
}

/// List a post's comments, newest first
///
/// GET /comments/{post_id}?page&limit
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
    page: PageQuery,
) -> ApiResult<Success<CommentListResponse>> {
    let post_id = path.post_id()?;

    let service = CommentService::new(state.service_context());
    let response = service
        .list_comments(post_id, page.page, page.limit)
        .await?;
    Ok(Success(response))
}
