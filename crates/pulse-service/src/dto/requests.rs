//! Request DTOs with validation
//!
//! Shapes shared by both transport adapters: the HTTP handlers deserialize
//! them from request bodies, the gateway from request-frame payloads.

use serde::Deserialize;
use validator::Validate;

/// Body of `POST /reactions/{post_id}` and payload of `reaction:upsert`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertReactionRequest {
    /// Requested reaction kind; validated against the closed set by the
    /// service (unknown kinds are rejected, not defaulted)
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 16))]
    pub kind: String,
}

/// Body of `POST /comments/{post_id}` and payload of `comment:create`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,

    #[validate(url)]
    pub media: Option<String>,

    /// Parent comment for threaded replies; must reference a comment on the
    /// same post
    pub parent_id: Option<String>,
}

/// Body of `PATCH /comments/{comment_id}` and payload of `comment:update`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Body of `POST /posts`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,

    #[validate(url)]
    pub media: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_request_renames_type_field() {
        let req: UpsertReactionRequest = serde_json::from_str(r#"{"type":"love"}"#).unwrap();
        assert_eq!(req.kind, "love");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_comment_request_validation() {
        let req = CreateCommentRequest {
            content: String::new(),
            media: None,
            parent_id: None,
        };
        assert!(req.validate().is_err());

        let req = CreateCommentRequest {
            content: "a".repeat(2001),
            media: None,
            parent_id: None,
        };
        assert!(req.validate().is_err());

        let req = CreateCommentRequest {
            content: "looks great".to_string(),
            media: Some("https://cdn.example.com/pic.png".to_string()),
            parent_id: Some("123".to_string()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_comment_media_must_be_url() {
        let req = CreateCommentRequest {
            content: "hi".to_string(),
            media: Some("not a url".to_string()),
            parent_id: None,
        };
        assert!(req.validate().is_err());
    }
}
