//! # pulse-service
//!
//! Application layer: the reaction and comment engines plus their DTOs.
//! Both transport adapters (HTTP and WebSocket) call these services and get
//! identical semantics - the engine is the single source of truth.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    CommentCreatedResponse, CommentDeletedResponse, CommentListResponse, CommentResponse,
    CreateCommentRequest, CreatePostRequest, HealthResponse, PaginationMeta, PostResponse,
    ReactionUpdateResponse, ReadinessResponse, UpdateCommentRequest, UpsertReactionRequest,
    UserResponse,
};
pub use services::{
    CommentService, PostService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
