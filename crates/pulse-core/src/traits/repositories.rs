//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. The reaction and comment ports carry the
//! transactional engine operations: each one executes its read-decide-write
//! cycle as a single atomic unit and returns the aggregate snapshot observed
//! after its own writes.

use async_trait::async_trait;

use crate::entities::{Comment, Post, PostAggregate, Reaction, ReactionTransition, User};
use crate::error::DomainError;
use crate::value_objects::{ReactionKind, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID (including its aggregate fields)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Create a new post with zeroed counters
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Read just the counter snapshot for a post
    async fn fetch_aggregate(&self, post_id: Snowflake) -> RepoResult<Option<PostAggregate>>;
}

// ============================================================================
// Reaction Repository (the reaction ledger engine)
// ============================================================================

/// Result of applying a reaction: which branch ran, the caller's resulting
/// fact (None after toggle-off), and the fresh aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub transition: ReactionTransition,
    pub reaction: Option<Reaction>,
    pub aggregate: PostAggregate,
}

/// Result of clearing a reaction: the removed kind (None when there was
/// nothing to remove) and the aggregate either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearOutcome {
    pub removed: Option<ReactionKind>,
    pub aggregate: PostAggregate,
}

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the caller's reaction fact for a post
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Reaction>>;

    /// Apply a reaction atomically: read the current fact, plan the
    /// create/switch/toggle-off transition, write the fact and the counter
    /// deltas as one transaction.
    ///
    /// Fails with `PostNotFound` when the post does not exist and
    /// `StorageContention` when the transaction cannot commit within the
    /// retry budget; in both cases nothing is applied.
    async fn apply(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome>;

    /// Remove the caller's reaction atomically, decrementing the bucket and
    /// recomputing the total (both clamped at zero). A missing fact is a
    /// no-op, not an error.
    async fn clear(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<ClearOutcome>;

    /// Count live reaction facts per kind for a post (invariant checks and
    /// admin tooling; the hot path reads the aggregate instead)
    async fn count_by_kind(&self, post_id: Snowflake) -> RepoResult<Vec<(ReactionKind, i64)>>;
}

// ============================================================================
// Comment Repository (the comment counter engine)
// ============================================================================

/// One page of comments with their authors, plus the total live count used
/// to derive the pagination block.
#[derive(Debug, Clone)]
pub struct CommentPage {
    pub rows: Vec<(Comment, User)>,
    pub total: i64,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment fact and increment the parent post's comment count
    /// as one transaction; returns the fresh count.
    ///
    /// Fails with `PostNotFound` when the post does not exist, and with
    /// `ValidationError` when `parent_id` names a comment that is missing
    /// or belongs to a different post.
    async fn create_counted(&self, comment: &Comment) -> RepoResult<i64>;

    /// Update a comment's content, only when `author_id` matches; returns
    /// None otherwise (callers report that as not-found).
    async fn update_owned(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
        content: &str,
    ) -> RepoResult<Option<Comment>>;

    /// Delete a comment fact and decrement the parent post's comment count
    /// (clamped at zero) as one transaction, only when `author_id` matches.
    /// Returns the post id and fresh count, or None when no owned fact
    /// matched - in which case nothing was decremented.
    async fn delete_owned(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
    ) -> RepoResult<Option<(Snowflake, i64)>>;

    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Find comment by ID joined with its author
    async fn find_with_author(&self, id: Snowflake) -> RepoResult<Option<(Comment, User)>>;

    /// List a page of comments for a post, newest first, with authors
    async fn list_page(
        &self,
        post_id: Snowflake,
        offset: i64,
        limit: i64,
    ) -> RepoResult<CommentPage>;

    /// Count live comment facts for a post
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64>;
}
