//! Post handlers
//!
//! Minimal parent-entity endpoints: create a post and read it with its
//! aggregate counters.

use axum::extract::{Path, State};
use pulse_service::{CreatePostRequest, PostResponse, PostService};

use crate::extractors::{AuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, Success};
use crate::state::AppState;

/// Create a post
///
/// POST /posts with body `{content, media?}`
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<PostWrapper>> {
    let service = PostService::new(state.service_context());
    let post = service
        .create_post(auth.user_id, &body.content, body.media)
        .await?;
    Ok(Created(PostWrapper { post }))
}

/// Fetch a post with its counters
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Success<PostWrapper>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let post = service.get_post(post_id).await?;
    Ok(Success(PostWrapper { post }))
}

/// Posts nest under a `post` key in the envelope
#[derive(Debug, serde::Serialize)]
pub struct PostWrapper {
    pub post: PostResponse,
}
