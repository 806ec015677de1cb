//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    /// Transaction could not commit within the retry budget; nothing was
    /// applied
    #[error("Storage contention: {0}")]
    StorageContention(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::StorageContention(_) => "STORAGE_CONTENTION",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::CommentNotFound(_) | Self::UserNotFound(_)
        )
    }

    /// Check if this is a validation error
    ///
    /// Validation errors are deterministic; the engines never retry them.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidReactionKind(_) | Self::ValidationError(_) | Self::ContentTooLong { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::PostNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_POST");

        let err = DomainError::InvalidReactionKind("dislike".to_string());
        assert_eq!(err.code(), "INVALID_REACTION_KIND");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::PostNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::CommentNotFound(Snowflake::new(1)).is_not_found());
        assert!(!DomainError::ValidationError("x".to_string()).is_not_found());
    }

    #[test]
    fn test_is_validation() {
        assert!(DomainError::InvalidReactionKind("x".to_string()).is_validation());
        assert!(DomainError::ContentTooLong { max: 2000 }.is_validation());
        assert!(!DomainError::StorageContention("busy".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::PostNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Post not found: 123");

        let err = DomainError::ContentTooLong { max: 2000 };
        assert_eq!(err.to_string(), "Content too long: max 2000 characters");
    }
}
