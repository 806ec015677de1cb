//! # pulse-cache
//!
//! Redis layer: connection pool and pub/sub event fan-out.
//!
//! Mutations commit in whichever process handled them (API or gateway);
//! the resulting events travel over Redis pub/sub to every gateway process
//! so room subscribers receive them regardless of which node holds their
//! socket.
//!
//! ## Example
//!
//! ```ignore
//! use pulse_cache::{Publisher, PubSubChannel, PubSubEvent, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Publisher::new(pool);
//!
//! let event = PubSubEvent::new("REACTION_UPDATE", data);
//! publisher.publish(&PubSubChannel::post(post_id), &event).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export pubsub types
pub use pubsub::{
    EventTarget, PubSubChannel, PubSubEvent, Publisher, ReceivedMessage, Subscriber,
    SubscriberBuilder, SubscriberConfig, SubscriberError, SubscriberResult, BROADCAST_CHANNEL,
    POST_CHANNEL_PREFIX, USER_CHANNEL_PREFIX,
};
