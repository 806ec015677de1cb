//! Handler error types

use crate::protocol::CloseCode;
use pulse_core::DomainError;
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid payload received
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Not authenticated
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Already authenticated
    #[error("Already authenticated")]
    AlreadyAuthenticated,

    /// Service error
    #[error("{0}")]
    ServiceError(#[from] pulse_service::ServiceError),

    /// Domain error (from repositories)
    #[error("{0}")]
    DomainError(#[from] DomainError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert to a close code for protocol-level failures; request-level
    /// failures are answered with `{ok: false}` acks instead of closing
    pub fn to_close_code(&self) -> Option<CloseCode> {
        match self {
            Self::InvalidPayload(_) => Some(CloseCode::DecodeError),
            Self::AuthenticationFailed(_) => Some(CloseCode::AuthenticationFailed),
            Self::NotAuthenticated => Some(CloseCode::NotAuthenticated),
            Self::AlreadyAuthenticated => Some(CloseCode::AlreadyAuthenticated),
            Self::ServiceError(_) | Self::DomainError(_) | Self::Internal(_) => {
                Some(CloseCode::UnknownError)
            }
        }
    }

    /// Error code string for `{ok: false}` acknowledgements
    pub fn ack_code(&self) -> &str {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::AlreadyAuthenticated => "ALREADY_AUTHENTICATED",
            Self::ServiceError(e) => e.error_code(),
            Self::DomainError(e) => e.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::Snowflake;

    #[test]
    fn test_domain_errors_keep_their_ack_codes() {
        let err = HandlerError::from(DomainError::PostNotFound(Snowflake::new(1)));
        assert_eq!(err.ack_code(), "UNKNOWN_POST");

        let err = HandlerError::from(DomainError::InvalidReactionKind("meh".to_string()));
        assert_eq!(err.ack_code(), "INVALID_REACTION_KIND");
    }

    #[test]
    fn test_auth_errors_map_to_close_codes() {
        assert_eq!(
            HandlerError::NotAuthenticated.to_close_code(),
            Some(CloseCode::NotAuthenticated)
        );
        assert_eq!(
            HandlerError::AlreadyAuthenticated.to_close_code(),
            Some(CloseCode::AlreadyAuthenticated)
        );
    }
}
