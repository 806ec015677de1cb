//! Comment entity - one fact per comment, optionally threaded

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Maximum comment length in characters
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub media: Option<String>,
    pub parent_id: Option<Snowflake>,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new top-level Comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            post_id,
            author_id,
            content,
            media: None,
            parent_id: None,
            likes_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a media URL
    pub fn with_media(mut self, media: String) -> Self {
        self.media = Some(media);
        self
    }

    /// Make this comment a reply to another comment on the same post
    pub fn with_parent(mut self, parent_id: Snowflake) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Check if this comment is a threaded reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if the given user authored this comment
    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_creation() {
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(100),
            "nice post".to_string(),
        );
        assert!(!comment.is_reply());
        assert_eq!(comment.likes_count, 0);
        assert!(comment.is_authored_by(Snowflake::new(100)));
        assert!(!comment.is_authored_by(Snowflake::new(101)));
    }

    #[test]
    fn test_comment_reply() {
        let comment = Comment::new(
            Snowflake::new(2),
            Snowflake::new(10),
            Snowflake::new(100),
            "agreed".to_string(),
        )
        .with_parent(Snowflake::new(1));
        assert!(comment.is_reply());
        assert_eq!(comment.parent_id, Some(Snowflake::new(1)));
    }
}
