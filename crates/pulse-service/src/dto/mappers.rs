//! Entity to DTO mappers

use pulse_core::entities::{Comment, Post, User};
use pulse_core::traits::ReactionOutcome;

use super::responses::{
    CommentResponse, PaginationMeta, PostResponse, ReactionUpdateResponse, UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            content: post.content.clone(),
            media: post.media.clone(),
            reactions: post.reactions,
            likes_count: post.likes_count,
            comments_count: post.comments_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Combine a comment with its author row
pub fn comment_response(comment: &Comment, author: &User) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        author: UserResponse::from(author),
        content: comment.content.clone(),
        media: comment.media.clone(),
        parent_id: comment.parent_id.map(|id| id.to_string()),
        likes_count: comment.likes_count,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

impl From<&ReactionOutcome> for ReactionUpdateResponse {
    fn from(outcome: &ReactionOutcome) -> Self {
        Self {
            post_id: outcome.aggregate.post_id.to_string(),
            reactions: outcome.aggregate.reactions,
            likes_count: outcome.aggregate.likes_count,
            my_reaction: outcome.reaction.as_ref().map(|r| r.kind),
        }
    }
}

/// Derive the pagination block from page/limit and the total live count
pub fn pagination_meta(page: i64, limit: i64, total: i64, returned: usize) -> PaginationMeta {
    let total_pages = if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    };
    let offset = (page - 1) * limit;

    PaginationMeta {
        current_page: page,
        total_pages,
        total_count: total,
        has_next: (offset + returned as i64) < total,
        has_prev: page > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_boundaries() {
        // 5 comments, 2 per page
        let first = pagination_meta(1, 2, 5, 2);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let last = pagination_meta(3, 2, 5, 1);
        assert!(!last.has_next);
        assert!(last.has_prev);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = pagination_meta(1, 20, 0, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }
}
