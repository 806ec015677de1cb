//! Event dispatcher
//!
//! Receives events from Redis Pub/Sub and delivers them to post-room
//! subscribers as Dispatch frames, excluding the acting user named in the
//! event target (the actor already received its result over the
//! acknowledgement).

use crate::connection::ConnectionManager;
use crate::protocol::GatewayMessage;
use pulse_cache::{PubSubChannel, ReceivedMessage, Subscriber, SubscriberBuilder};
use pulse_core::Snowflake;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Configuration for the event dispatcher
#[derive(Debug, Clone)]
pub struct EventDispatcherConfig {
    /// Redis URL
    pub redis_url: String,
    /// Broadcast buffer size
    pub broadcast_buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for EventDispatcherConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Event dispatcher that routes Redis Pub/Sub messages to WebSocket connections
pub struct EventDispatcher {
    /// Connection manager for sending messages
    connection_manager: Arc<ConnectionManager>,
    /// Redis subscriber
    subscriber: Subscriber,
    /// Whether the dispatcher is running
    running: Arc<AtomicBool>,
    /// Sequence number for dispatched events
    sequence: Arc<AtomicU64>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    pub async fn new(
        config: EventDispatcherConfig,
        connection_manager: Arc<ConnectionManager>,
    ) -> Result<Self, pulse_cache::SubscriberError> {
        let subscriber = SubscriberBuilder::new()
            .redis_url(&config.redis_url)
            .broadcast_buffer(config.broadcast_buffer)
            .reconnect_delay_ms(config.reconnect_delay_ms)
            // Subscribe to broadcast channel by default
            .subscribe(PubSubChannel::broadcast())
            .build()
            .await?;

        Ok(Self {
            connection_manager,
            subscriber,
            running: Arc::new(AtomicBool::new(false)),
            sequence: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Subscribe to a post room's events
    pub async fn subscribe_post(
        &self,
        post_id: Snowflake,
    ) -> Result<(), pulse_cache::SubscriberError> {
        self.subscriber
            .subscribe(&[PubSubChannel::post(post_id)])
            .await
    }

    /// Unsubscribe from a post room's events
    pub async fn unsubscribe_post(
        &self,
        post_id: Snowflake,
    ) -> Result<(), pulse_cache::SubscriberError> {
        self.subscriber
            .unsubscribe(&[PubSubChannel::post(post_id)])
            .await
    }

    /// Start the dispatcher loop
    ///
    /// Consumes messages from the subscriber and fans them out to local
    /// connections until `stop` is called.
    pub fn start(self: Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("Event dispatcher already running");
            return;
        }

        let dispatcher = self.clone();
        tokio::spawn(async move {
            let mut receiver = dispatcher.subscriber.receiver();

            tracing::info!("Event dispatcher started");

            while dispatcher.running.load(Ordering::SeqCst) {
                match receiver.recv().await {
                    Ok(message) => dispatcher.handle_message(message).await,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Event dispatcher lagged behind");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        tracing::warn!("Subscriber channel closed, dispatcher stopping");
                        break;
                    }
                }
            }

            tracing::info!("Event dispatcher stopped");
        });
    }

    /// Stop the dispatcher loop
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Route one received pub/sub message
    async fn handle_message(&self, message: ReceivedMessage) {
        let Some(event) = message.event else {
            tracing::debug!(channel = %message.channel, "Ignoring non-event payload");
            return;
        };

        let exclude_user = event
            .target
            .as_ref()
            .and_then(|t| t.exclude_users.first())
            .and_then(|raw| raw.parse::<Snowflake>().ok());

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let frame = GatewayMessage::dispatch(event.event_type.clone(), seq, event.data);

        match message.channel {
            PubSubChannel::Post(post_id) => {
                self.connection_manager
                    .send_to_post(post_id, frame, exclude_user)
                    .await;
            }
            PubSubChannel::User(user_id) => {
                self.connection_manager.send_to_user(user_id, frame).await;
            }
            PubSubChannel::Broadcast => {
                self.connection_manager.broadcast(frame).await;
            }
            PubSubChannel::Custom(name) => {
                tracing::debug!(channel = %name, "Ignoring event on unrecognized channel");
            }
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("running", &self.running.load(Ordering::SeqCst))
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .finish()
    }
}
