//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub media: Option<String>,
    pub parent_id: Option<i64>,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment row joined with its author (for list/detail payloads)
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorModel {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub media: Option<String>,
    pub parent_id: Option<i64>,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_username: String,
    pub author_avatar: Option<String>,
    pub author_created_at: DateTime<Utc>,
    pub author_updated_at: DateTime<Utc>,
}
