//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{Post, PostAggregate};
use pulse_core::traits::{PostRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::{PostAggregateModel, PostModel};

use super::error::map_db_error;

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, author_id, content, media,
                   reactions_like, reactions_love, reactions_haha,
                   reactions_wow, reactions_sad, reactions_angry,
                   likes_count, comments_count, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, content, media,
                               reactions_like, reactions_love, reactions_haha,
                               reactions_wow, reactions_sad, reactions_angry,
                               likes_count, comments_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.content)
        .bind(post.media.as_deref())
        .bind(post.reactions.like)
        .bind(post.reactions.love)
        .bind(post.reactions.haha)
        .bind(post.reactions.wow)
        .bind(post.reactions.sad)
        .bind(post.reactions.angry)
        .bind(post.likes_count)
        .bind(post.comments_count)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_aggregate(&self, post_id: Snowflake) -> RepoResult<Option<PostAggregate>> {
        let result = sqlx::query_as::<_, PostAggregateModel>(
            r#"
            SELECT id, reactions_like, reactions_love, reactions_haha,
                   reactions_wow, reactions_sad, reactions_angry,
                   likes_count, comments_count
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PostAggregate::from))
    }
}
