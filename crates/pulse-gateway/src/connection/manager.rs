//! Connection manager
//!
//! The session registry: all active WebSocket connections, indexed by
//! session id, user, and subscribed post room. DashMap keeps access
//! concurrent without a global lock.

use super::{Connection, ConnectionState};
use crate::protocol::GatewayMessage;
use dashmap::DashMap;
use pulse_core::Snowflake;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by session ID
    connections: DashMap<String, Arc<Connection>>,

    /// User ID to session IDs mapping
    user_connections: DashMap<Snowflake, HashSet<String>>,

    /// Post room to session IDs mapping
    post_connections: DashMap<Snowflake, HashSet<String>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_connections: DashMap::new(),
            post_connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        session_id: String,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Connection> {
        let connection = Connection::new(session_id.clone(), sender);
        self.connections.insert(session_id.clone(), connection.clone());

        tracing::debug!(session_id = %session_id, "Connection added");

        connection
    }

    /// Remove a connection and purge it from every index
    ///
    /// Uses `alter` for atomic modify-and-cleanup operations to avoid TOCTOU
    /// race conditions.
    pub async fn remove_connection(&self, session_id: &str) {
        if let Some((_, connection)) = self.connections.remove(session_id) {
            // Remove from user mapping
            if let Some(user_id) = connection.user_id().await {
                self.user_connections.alter(&user_id, |_, mut sessions| {
                    sessions.remove(session_id);
                    sessions
                });
                self.user_connections.retain(|_, sessions| !sessions.is_empty());
            }

            // Remove from post-room mappings
            for post_id in connection.posts().await {
                self.post_connections.alter(&post_id, |_, mut sessions| {
                    sessions.remove(session_id);
                    sessions
                });
            }
            self.post_connections.retain(|_, sessions| !sessions.is_empty());

            tracing::debug!(session_id = %session_id, "Connection removed");
        }
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| r.clone())
    }

    /// Authenticate a connection (link to user)
    pub async fn authenticate_connection(&self, session_id: &str, user_id: Snowflake) -> bool {
        if let Some(connection) = self.connections.get(session_id) {
            connection.set_user_id(user_id).await;
            connection.set_state(ConnectionState::Connected).await;

            self.user_connections
                .entry(user_id)
                .or_default()
                .insert(session_id.to_string());

            tracing::debug!(
                session_id = %session_id,
                user_id = %user_id,
                "Connection authenticated"
            );

            true
        } else {
            false
        }
    }

    /// Subscribe a connection to a post room
    pub async fn subscribe_to_post(&self, session_id: &str, post_id: Snowflake) -> bool {
        if let Some(connection) = self.connections.get(session_id) {
            connection.subscribe_post(post_id).await;

            self.post_connections
                .entry(post_id)
                .or_default()
                .insert(session_id.to_string());

            tracing::trace!(
                session_id = %session_id,
                post_id = %post_id,
                "Connection joined post room"
            );

            true
        } else {
            false
        }
    }

    /// Unsubscribe a connection from a post room
    pub async fn unsubscribe_from_post(&self, session_id: &str, post_id: Snowflake) -> bool {
        if let Some(connection) = self.connections.get(session_id) {
            connection.unsubscribe_post(post_id).await;

            self.post_connections.alter(&post_id, |_, mut sessions| {
                sessions.remove(session_id);
                sessions
            });
            self.post_connections.retain(|_, sessions| !sessions.is_empty());

            tracing::trace!(
                session_id = %session_id,
                post_id = %post_id,
                "Connection left post room"
            );

            true
        } else {
            false
        }
    }

    /// Get all connections for a user
    pub fn get_user_connections(&self, user_id: Snowflake) -> Vec<Arc<Connection>> {
        self.user_connections
            .get(&user_id)
            .map(|sessions| {
                sessions
                    .iter()
                    .filter_map(|sid| self.connections.get(sid).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get all connections subscribed to a post room
    pub fn get_post_connections(&self, post_id: Snowflake) -> Vec<Arc<Connection>> {
        self.post_connections
            .get(&post_id)
            .map(|sessions| {
                sessions
                    .iter()
                    .filter_map(|sid| self.connections.get(sid).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Send a message to all connections of a user
    pub async fn send_to_user(&self, user_id: Snowflake, message: GatewayMessage) -> usize {
        let connections = self.get_user_connections(user_id);
        let mut sent = 0;

        for conn in connections {
            if conn.send(message.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(user_id = %user_id, sent = sent, "Message sent to user connections");

        sent
    }

    /// Send a message to every subscriber of a post room, optionally
    /// excluding one user (the actor already received its acknowledgement)
    pub async fn send_to_post(
        &self,
        post_id: Snowflake,
        message: GatewayMessage,
        exclude_user: Option<Snowflake>,
    ) -> usize {
        let connections = self.get_post_connections(post_id);
        let mut sent = 0;

        for conn in connections {
            if let Some(exclude) = exclude_user {
                if conn.user_id().await == Some(exclude) {
                    continue;
                }
            }

            if conn.send(message.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(
            post_id = %post_id,
            sent = sent,
            "Message sent to post room"
        );

        sent
    }

    /// Broadcast a message to all connections
    pub async fn broadcast(&self, message: GatewayMessage) -> usize {
        let mut sent = 0;

        for entry in self.connections.iter() {
            if entry.send(message.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::debug!(sent = sent, "Message broadcast to all connections");

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of unique authenticated users
    pub fn user_count(&self) -> usize {
        self.user_connections.len()
    }

    /// Get the number of post rooms with active subscribers
    pub fn post_count(&self) -> usize {
        self.post_connections.len()
    }

    /// Check whether a post room still has local subscribers
    pub fn has_post_subscribers(&self, post_id: Snowflake) -> bool {
        self.post_connections
            .get(&post_id)
            .is_some_and(|sessions| !sessions.is_empty())
    }

    /// Check if a session exists
    pub fn has_session(&self, session_id: &str) -> bool {
        self.connections.contains_key(session_id)
    }

    /// Clean up closed connections
    pub async fn cleanup_closed_connections(&self) -> usize {
        let closed: Vec<String> = self
            .connections
            .iter()
            .filter(|r| r.is_closed())
            .map(|r| r.key().clone())
            .collect();

        let count = closed.len();

        for session_id in closed {
            self.remove_connection(&session_id).await;
        }

        if count > 0 {
            tracing::info!(count = count, "Cleaned up closed connections");
        }

        count
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("users", &self.user_connections.len())
            .field("posts", &self.post_connections.len())
            .finish()
    }
}
