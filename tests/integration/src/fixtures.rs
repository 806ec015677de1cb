//! Test fixtures and data generators
//!
//! Request shapes for the endpoints under test and response shapes for the
//! `{status: ...}` envelope.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostBody {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl CreatePostBody {
    pub fn unique() -> Self {
        Self {
            content: format!("Test post {}", unique_suffix()),
            media: None,
        }
    }
}

/// Reaction request body
#[derive(Debug, Serialize)]
pub struct ReactionBody {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ReactionBody {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
        }
    }
}

/// Create comment request body
#[derive(Debug, Serialize)]
pub struct CreateCommentBody {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl CreateCommentBody {
    pub fn unique() -> Self {
        Self {
            content: format!("Test comment {}", unique_suffix()),
            media: None,
            parent_id: None,
        }
    }
}

/// Per-kind reaction buckets as serialized in responses
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReactionBuckets {
    pub like: i32,
    pub love: i32,
    pub haha: i32,
    pub wow: i32,
    pub sad: i32,
    pub angry: i32,
}

impl ReactionBuckets {
    pub fn total(&self) -> i32 {
        self.like + self.love + self.haha + self.wow + self.sad + self.angry
    }
}

/// Envelope of a created/fetched post
#[derive(Debug, Deserialize)]
pub struct PostEnvelope {
    pub status: String,
    pub post: PostBody,
}

/// Post payload inside the envelope
#[derive(Debug, Deserialize)]
pub struct PostBody {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub reactions: ReactionBuckets,
    pub likes_count: i32,
    pub comments_count: i32,
}

/// Envelope of a reaction upsert/remove
#[derive(Debug, Deserialize)]
pub struct ReactionEnvelope {
    pub status: String,
    pub post_id: String,
    pub reactions: ReactionBuckets,
    pub likes_count: i32,
    pub my_reaction: Option<String>,
}

/// Comment payload inside envelopes
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub id: String,
    pub post_id: String,
    pub author: CommentAuthor,
    pub content: String,
    pub parent_id: Option<String>,
}

/// Comment author identity
#[derive(Debug, Deserialize)]
pub struct CommentAuthor {
    pub id: String,
    pub username: String,
}

/// Envelope of a comment creation
#[derive(Debug, Deserialize)]
pub struct CommentCreatedEnvelope {
    pub status: String,
    pub comment: CommentBody,
    pub comments_count: i64,
}

/// Envelope of a comment deletion
#[derive(Debug, Deserialize)]
pub struct CommentDeletedEnvelope {
    pub status: String,
    pub post_id: String,
    pub comment_id: String,
    pub comments_count: i64,
}

/// Envelope of a comment listing
#[derive(Debug, Deserialize)]
pub struct CommentListEnvelope {
    pub status: String,
    pub comments: Vec<CommentBody>,
    pub pagination: PaginationBody,
}

/// Pagination block
#[derive(Debug, Deserialize)]
pub struct PaginationBody {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Failure envelope
#[derive(Debug, Deserialize)]
pub struct FailureEnvelope {
    pub status: String,
    pub error: FailureError,
}

/// Failure detail
#[derive(Debug, Deserialize)]
pub struct FailureError {
    pub code: String,
    pub message: String,
}
