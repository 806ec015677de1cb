//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken`
//! crate. Both transport adapters resolve caller identity by validating a
//! bearer token; issuance normally happens in the upstream identity service,
//! but `issue_token` exists so tests and tooling can mint valid tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pulse_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the user ID as a Snowflake
    ///
    /// # Errors
    /// Returns an error if the subject cannot be parsed as a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        self.sub
            .parse::<i64>()
            .map(Snowflake::new)
            .map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT service for encoding and decoding bearer tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry in seconds
    #[must_use]
    pub fn new(secret: &str, token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry,
        }
    }

    /// Issue a bearer token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_token(&self, user_id: Snowflake) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a bearer token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_expiry", &self.token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900)
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_test_service();
        let user_id = Snowflake::new(12345);

        let token = service.issue_token(user_id).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "12345");
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_validate_garbage_token() {
        let service = create_test_service();
        let result = service.validate_token("not.a.token");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_validate_wrong_secret() {
        let service = create_test_service();
        let token = service.issue_token(Snowflake::new(1)).unwrap();

        let other = JwtService::new("a-completely-different-secret-key", 900);
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the decoder's default 60s leeway
        let service = JwtService::new("test-secret-key-that-is-long-enough", -300);
        let token = service.issue_token(Snowflake::new(1)).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::TokenExpired)
        ));
    }
}
