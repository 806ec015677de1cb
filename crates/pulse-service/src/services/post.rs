//! Post service
//!
//! Minimal parent-entity operations so the aggregate has a home: create a
//! post with zeroed counters and fetch one with its counters. Feed
//! assembly, search, and the rest of post CRUD live elsewhere.

use pulse_core::{Post, Snowflake};
use tracing::{info, instrument};

use crate::dto::PostResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Maximum post length in characters
const MAX_POST_LENGTH: usize = 5000;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post with zeroed counters
    #[instrument(skip(self, content, media))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        content: &str,
        media: Option<String>,
    ) -> ServiceResult<PostResponse> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::validation("content must not be empty"));
        }
        if trimmed.chars().count() > MAX_POST_LENGTH {
            return Err(ServiceError::validation(format!(
                "content exceeds {MAX_POST_LENGTH} characters"
            )));
        }

        let mut post = Post::new(self.ctx.generate_id(), author_id, trimmed.to_string());
        post.media = media;

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(PostResponse::from(&post))
    }

    /// Fetch a post with its aggregate counters
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        Ok(PostResponse::from(&post))
    }
}
