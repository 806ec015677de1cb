//! Comment service
//!
//! Front door of the comment counter engine: content validation, the atomic
//! create/delete with counter movement, author attachment, pagination, and
//! room events.

use pulse_cache::{EventTarget, PubSubChannel, PubSubEvent};
use pulse_core::{Comment, Snowflake, MAX_COMMENT_LENGTH};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::mappers::{comment_response, pagination_meta};
use crate::dto::{CommentCreatedResponse, CommentDeletedResponse, CommentListResponse, CommentResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::{EVENT_COMMENT_CREATE, EVENT_COMMENT_DELETE};

/// Default page size for comment listings
const DEFAULT_PAGE_LIMIT: i64 = 20;
/// Maximum page size for comment listings
const MAX_PAGE_LIMIT: i64 = 100;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a comment and bump the post's comment count atomically
    #[instrument(skip(self, content, media))]
    pub async fn create_comment(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
        content: &str,
        media: Option<String>,
        parent_id: Option<Snowflake>,
    ) -> ServiceResult<CommentCreatedResponse> {
        let content = validate_content(content)?;

        let mut comment = Comment::new(self.ctx.generate_id(), post_id, user_id, content);
        comment.media = media;
        comment.parent_id = parent_id;

        let comments_count = self.ctx.comment_repo().create_counted(&comment).await?;

        // Re-read joined with the author so the payload carries identity
        let (comment, author) = self
            .ctx
            .comment_repo()
            .find_with_author(comment.id)
            .await?
            .ok_or_else(|| ServiceError::internal("created comment vanished"))?;

        let response = comment_response(&comment, &author);

        info!(
            comment_id = %comment.id,
            post_id = %post_id,
            user_id = %user_id,
            comments_count,
            "Comment created"
        );

        let event = PubSubEvent::new(
            EVENT_COMMENT_CREATE,
            json!({
                "post_id": post_id.to_string(),
                "comment": response,
                "comments_count": comments_count,
            }),
        )
        .with_target(
            EventTarget::empty()
                .with_post(post_id.to_string())
                .excluding_user(user_id.to_string()),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::post(post_id), &event)
            .await
            .ok();

        Ok(CommentCreatedResponse {
            comment: response,
            comments_count,
        })
    }

    /// Edit a comment's content; author-only
    #[instrument(skip(self, content))]
    pub async fn update_comment(
        &self,
        user_id: Snowflake,
        comment_id: Snowflake,
        content: &str,
    ) -> ServiceResult<CommentResponse> {
        let content = validate_content(content)?;

        let updated = self
            .ctx
            .comment_repo()
            .update_owned(comment_id, user_id, &content)
            .await?
            // Wrong id and wrong owner look identical to the caller
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(updated.author_id)
            .await?
            .ok_or_else(|| ServiceError::internal("comment author missing"))?;

        info!(comment_id = %comment_id, user_id = %user_id, "Comment updated");

        Ok(comment_response(&updated, &author))
    }

    /// Delete a comment and drop the post's comment count atomically;
    /// author-only, and a non-match decrements nothing
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        user_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<CommentDeletedResponse> {
        let (post_id, comments_count) = self
            .ctx
            .comment_repo()
            .delete_owned(comment_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        info!(
            comment_id = %comment_id,
            post_id = %post_id,
            user_id = %user_id,
            comments_count,
            "Comment deleted"
        );

        let event = PubSubEvent::new(
            EVENT_COMMENT_DELETE,
            json!({
                "post_id": post_id.to_string(),
                "comment_id": comment_id.to_string(),
                "comments_count": comments_count,
            }),
        )
        .with_target(
            EventTarget::empty()
                .with_post(post_id.to_string())
                .excluding_user(user_id.to_string()),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::post(post_id), &event)
            .await
            .ok();

        Ok(CommentDeletedResponse {
            post_id: post_id.to_string(),
            comment_id: comment_id.to_string(),
            comments_count,
        })
    }

    /// List a post's comments, newest first, with a pagination block.
    /// Read-only and untransactional.
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: Snowflake,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> ServiceResult<CommentListResponse> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
        let offset = (page - 1) * limit;

        let result = self.ctx.comment_repo().list_page(post_id, offset, limit).await?;

        let comments: Vec<CommentResponse> = result
            .rows
            .iter()
            .map(|(comment, author)| comment_response(comment, author))
            .collect();
        let pagination = pagination_meta(page, limit, result.total, comments.len());

        Ok(CommentListResponse {
            comments,
            pagination,
        })
    }
}

/// Trim and bound comment content
fn validate_content(content: &str) -> ServiceResult<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("content must not be empty"));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(pulse_core::DomainError::ContentTooLong {
            max: MAX_COMMENT_LENGTH,
        }
        .into());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_trims() {
        assert_eq!(validate_content("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn test_validate_content_rejects_blank() {
        assert!(validate_content("   ").is_err());
        assert!(validate_content("").is_err());
    }

    #[test]
    fn test_validate_content_rejects_oversized() {
        let long = "x".repeat(MAX_COMMENT_LENGTH + 1);
        let err = validate_content(&long).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "CONTENT_TOO_LONG");
    }
}
