//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use pulse_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with post_id
#[derive(Debug, serde::Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    /// Parse post_id as Snowflake
    pub fn post_id(&self) -> Result<Snowflake, ApiError> {
        self.post_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid post_id format"))
    }
}

/// Path parameters with comment_id
#[derive(Debug, serde::Deserialize)]
pub struct CommentIdPath {
    pub comment_id: String,
}

impl CommentIdPath {
    /// Parse comment_id as Snowflake
    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        self.comment_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))
    }
}
