//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the reactions table
///
/// Primary key is (post_id, user_id): at most one reaction per pair.
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub post_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated reaction count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub kind: String,
    pub count: i64,
}
