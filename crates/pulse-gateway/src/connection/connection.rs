//! Individual WebSocket connection
//!
//! Represents a single WebSocket connection and its state.

use crate::protocol::GatewayMessage;
use pulse_core::Snowflake;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, RwLock};

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Connection established, waiting for Identify
    Connecting,
    /// Successfully authenticated
    Connected,
    /// Connection is closed
    Disconnected,
}

/// A single WebSocket connection
pub struct Connection {
    /// Unique session ID
    session_id: String,

    /// Authenticated user ID (None until Identify)
    user_id: RwLock<Option<Snowflake>>,

    /// Current connection state
    state: RwLock<ConnectionState>,

    /// Channel to send messages to the WebSocket
    sender: mpsc::Sender<GatewayMessage>,

    /// Last sequence number sent
    sequence: AtomicU64,

    /// Last heartbeat received
    last_heartbeat: RwLock<Instant>,

    /// Whether we've received a heartbeat for the current interval
    heartbeat_acked: RwLock<bool>,

    /// Post rooms this connection is subscribed to
    posts: RwLock<HashSet<Snowflake>>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(session_id: String, sender: mpsc::Sender<GatewayMessage>) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            user_id: RwLock::new(None),
            state: RwLock::new(ConnectionState::Connecting),
            sender,
            sequence: AtomicU64::new(0),
            last_heartbeat: RwLock::new(Instant::now()),
            heartbeat_acked: RwLock::new(true),
            posts: RwLock::new(HashSet::new()),
            created_at: Instant::now(),
        })
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the user ID (if authenticated)
    pub async fn user_id(&self) -> Option<Snowflake> {
        *self.user_id.read().await
    }

    /// Set the user ID (on successful authentication)
    pub async fn set_user_id(&self, user_id: Snowflake) {
        *self.user_id.write().await = Some(user_id);
    }

    /// Get the current state
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Set the connection state
    pub async fn set_state(&self, state: ConnectionState) {
        *self.state.write().await = state;
    }

    /// Check if the connection is authenticated
    pub async fn is_authenticated(&self) -> bool {
        self.user_id.read().await.is_some()
    }

    /// Get the next sequence number
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Get the current sequence number
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Record a heartbeat received
    pub async fn record_heartbeat(&self) {
        *self.last_heartbeat.write().await = Instant::now();
    }

    /// Get time since last heartbeat
    pub async fn time_since_heartbeat(&self) -> std::time::Duration {
        self.last_heartbeat.read().await.elapsed()
    }

    /// Check if heartbeat was acknowledged
    pub async fn is_heartbeat_acked(&self) -> bool {
        *self.heartbeat_acked.read().await
    }

    /// Mark heartbeat as acknowledged
    pub async fn ack_heartbeat(&self) {
        *self.heartbeat_acked.write().await = true;
    }

    /// Add a post-room subscription
    pub async fn subscribe_post(&self, post_id: Snowflake) {
        self.posts.write().await.insert(post_id);
    }

    /// Remove a post-room subscription
    pub async fn unsubscribe_post(&self, post_id: Snowflake) {
        self.posts.write().await.remove(&post_id);
    }

    /// Get all subscribed post rooms
    pub async fn posts(&self) -> Vec<Snowflake> {
        self.posts.read().await.iter().copied().collect()
    }

    /// Check if subscribed to a post room
    pub async fn is_subscribed_to(&self, post_id: Snowflake) -> bool {
        self.posts.read().await.contains(&post_id)
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Send a message to this connection
    pub async fn send(
        &self,
        message: GatewayMessage,
    ) -> Result<(), mpsc::error::SendError<GatewayMessage>> {
        self.sender.send(message).await
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .field("created_at", &self.created_at)
            .finish()
    }
}
