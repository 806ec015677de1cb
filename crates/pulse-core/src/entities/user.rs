//! User entity - the author identity attached to comments and reactions
//!
//! Account management lives upstream; this is the projection the engines
//! need to attach author identity to their payloads.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User
    pub fn new(id: Snowflake, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(Snowflake::new(1), "amira".to_string());
        assert_eq!(user.username, "amira");
        assert!(user.avatar.is_none());
    }
}
