//! # pulse-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `pulse-core`. Besides plain persistence it carries the two
//! transactional counter engines:
//!
//! - the reaction engine (`PgReactionRepository::apply`/`clear`), which
//!   executes the read-decide-write cycle for a (post, user) pair as one
//!   transaction with a bounded retry loop, and
//! - the comment engine (`PgCommentRepository::create_counted`/
//!   `delete_owned`), which keeps the parent post's comment counter in step
//!   with the comment facts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_db::pool::{create_pool, DatabaseConfig};
//! use pulse_db::repositories::PgReactionRepository;
//! use pulse_core::traits::ReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgPostRepository, PgReactionRepository, PgUserRepository,
};
