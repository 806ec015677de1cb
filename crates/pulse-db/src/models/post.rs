//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the posts table, counter columns included
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub media: Option<String>,
    pub reactions_like: i32,
    pub reactions_love: i32,
    pub reactions_haha: i32,
    pub reactions_wow: i32,
    pub reactions_sad: i32,
    pub reactions_angry: i32,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Just the counter columns, read after every engine transaction
#[derive(Debug, Clone, FromRow)]
pub struct PostAggregateModel {
    pub id: i64,
    pub reactions_like: i32,
    pub reactions_love: i32,
    pub reactions_haha: i32,
    pub reactions_wow: i32,
    pub reactions_sad: i32,
    pub reactions_angry: i32,
    pub likes_count: i32,
    pub comments_count: i32,
}
