//! Identify handler (op 2)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::events::{GatewayEventType, ReadyPayload, UserPayload};
use crate::protocol::{CloseCode, GatewayMessage, IdentifyPayload};
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles Identify messages
pub struct IdentifyHandler;

impl IdentifyHandler {
    /// Handle an Identify message
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: IdentifyPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        // Check if already authenticated
        if connection.is_authenticated().await {
            tracing::warn!(
                session_id = %connection.session_id(),
                "Client sent Identify while already authenticated"
            );
            return Ok(Some(CloseCode::AlreadyAuthenticated));
        }

        // Extract token (remove "Bearer " prefix if present)
        let token = payload.token.strip_prefix("Bearer ").unwrap_or(&payload.token);

        // Validate the token
        let claims = state
            .service_context()
            .jwt_service()
            .validate_token(token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                HandlerError::AuthenticationFailed(e.to_string())
            })?;

        let user_id = claims
            .user_id()
            .map_err(|e| HandlerError::AuthenticationFailed(e.to_string()))?;

        // Get user from database
        let user = state
            .service_context()
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| HandlerError::AuthenticationFailed("User not found".to_string()))?;

        // Authenticate the connection in the registry
        let session_id = connection.session_id().to_string();
        state
            .connection_manager()
            .authenticate_connection(&session_id, user_id)
            .await;

        // Build and send the READY event
        let ready = ReadyPayload {
            v: 1,
            user: UserPayload {
                id: user_id,
                username: user.username.clone(),
                avatar: user.avatar.clone(),
            },
            session_id: session_id.clone(),
        };

        let ready_data = serde_json::to_value(&ready).unwrap_or_default();
        let seq = connection.next_sequence();

        connection
            .send(GatewayMessage::dispatch(
                GatewayEventType::Ready.as_str(),
                seq,
                ready_data,
            ))
            .await
            .map_err(|e| HandlerError::Internal(format!("Failed to send READY: {e}")))?;

        tracing::info!(
            session_id = %session_id,
            user_id = %user_id,
            username = %user.username,
            "Client identified"
        );

        Ok(None)
    }
}
