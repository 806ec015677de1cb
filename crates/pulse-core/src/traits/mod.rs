//! Repository traits (ports) for the storage layer

mod repositories;

pub use repositories::{
    ClearOutcome, CommentPage, CommentRepository, PostRepository, ReactionOutcome,
    ReactionRepository, RepoResult, UserRepository,
};
