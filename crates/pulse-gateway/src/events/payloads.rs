//! Dispatch event payloads

use pulse_core::Snowflake;
use serde::{Deserialize, Serialize};

/// User identity carried in the READY event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: Snowflake,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// READY event sent after a successful Identify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyPayload {
    /// Protocol version
    pub v: u8,
    /// The authenticated user
    pub user: UserPayload,
    /// This connection's session id
    pub session_id: String,
}
