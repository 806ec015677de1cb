//! Response DTOs
//!
//! Serialized into the HTTP success envelope, gateway acknowledgements, and
//! broadcast payloads. Snowflakes serialize as strings throughout.

use chrono::{DateTime, Utc};
use pulse_core::{ReactionCounts, ReactionKind};
use serde::Serialize;

/// Author identity attached to comments
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a reaction upsert/remove: the fresh aggregate plus the
/// caller's own standing (None after toggle-off or removal)
#[derive(Debug, Clone, Serialize)]
pub struct ReactionUpdateResponse {
    pub post_id: String,
    pub reactions: ReactionCounts,
    pub likes_count: i32,
    pub my_reaction: Option<ReactionKind>,
}

/// A comment with its author attached
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: UserResponse,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of comment creation: the new comment and the fresh count
#[derive(Debug, Clone, Serialize)]
pub struct CommentCreatedResponse {
    pub comment: CommentResponse,
    pub comments_count: i64,
}

/// Result of comment deletion
#[derive(Debug, Clone, Serialize)]
pub struct CommentDeletedResponse {
    pub post_id: String,
    pub comment_id: String,
    pub comments_count: i64,
}

/// Page/limit pagination block for comment listings
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of comments
#[derive(Debug, Clone, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub pagination: PaginationMeta,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "healthy" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
    pub cache: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool, cache: bool) -> Self {
        Self {
            ready: database && cache,
            database,
            cache,
        }
    }
}

/// A post with its aggregate counters
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    pub reactions: ReactionCounts,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
