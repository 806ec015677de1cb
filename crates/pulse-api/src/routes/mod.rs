//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{comments, health, posts, reactions};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(post_routes())
        .merge(reaction_routes())
        .merge(comment_routes())
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route("/reactions/:post_id", post(reactions::upsert_reaction))
        .route("/reactions/:post_id", delete(reactions::remove_reaction))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/:post_id", post(comments::create_comment))
        .route("/comments/:post_id", get(comments::list_comments))
        .route("/comments/:comment_id", patch(comments::update_comment))
        .route("/comments/:comment_id", delete(comments::delete_comment))
}
