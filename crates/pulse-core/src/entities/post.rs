//! Post entity - the parent document carrying the denormalized aggregate

use chrono::{DateTime, Utc};

use crate::value_objects::{ReactionCounts, Snowflake};

/// Post entity
///
/// The counter fields are derived entirely from the reaction and comment
/// fact tables; they are only ever written inside the same transaction as
/// the fact they summarize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub media: Option<String>,
    pub reactions: ReactionCounts,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post with zeroed counters
    pub fn new(id: Snowflake, author_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            content,
            media: None,
            reactions: ReactionCounts::default(),
            likes_count: 0,
            comments_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a media URL
    pub fn with_media(mut self, media: String) -> Self {
        self.media = Some(media);
        self
    }

    /// Snapshot of just the counter fields
    #[must_use]
    pub fn aggregate(&self) -> PostAggregate {
        PostAggregate {
            post_id: self.id,
            reactions: self.reactions,
            likes_count: self.likes_count,
            comments_count: self.comments_count,
        }
    }
}

/// The counter snapshot returned by every engine operation, read inside the
/// transaction after its writes committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PostAggregate {
    pub post_id: Snowflake,
    pub reactions: ReactionCounts,
    pub likes_count: i32,
    pub comments_count: i32,
}

impl PostAggregate {
    /// True when the total equals the bucket sum and nothing is negative;
    /// must hold at every transaction boundary
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.likes_count == self.reactions.total()
            && self.comments_count >= 0
            && self.reactions.iter().all(|(_, count)| count >= 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ReactionKind;

    #[test]
    fn test_new_post_has_zeroed_counters() {
        let post = Post::new(Snowflake::new(1), Snowflake::new(2), "hello".to_string());
        assert_eq!(post.likes_count, 0);
        assert_eq!(post.comments_count, 0);
        assert_eq!(post.reactions.total(), 0);
        assert!(post.aggregate().is_consistent());
    }

    #[test]
    fn test_aggregate_consistency_check() {
        let mut post = Post::new(Snowflake::new(1), Snowflake::new(2), "hello".to_string());
        post.reactions.increment(ReactionKind::Like);
        post.likes_count = 1;
        assert!(post.aggregate().is_consistent());

        // A drifted total fails the check
        post.likes_count = 5;
        assert!(!post.aggregate().is_consistent());
    }
}
