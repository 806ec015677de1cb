//! PostgreSQL implementation of CommentRepository
//!
//! The comment engine applies the same transactional pattern as the reaction
//! engine to a one-to-many child collection: a comment fact and the parent
//! post's counter move together or not at all.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use pulse_core::entities::{Comment, User};
use pulse_core::error::DomainError;
use pulse_core::traits::{CommentPage, CommentRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::mappers::split_comment_author;
use crate::models::{CommentModel, CommentWithAuthorModel};

use super::error::{map_db_error, resolve_attempt, TxError};

const COMMENT_AUTHOR_COLUMNS: &str = r#"
    c.id, c.post_id, c.author_id, c.content, c.media, c.parent_id,
    c.likes_count, c.created_at, c.updated_at,
    u.username AS author_username, u.avatar AS author_avatar,
    u.created_at AS author_created_at, u.updated_at AS author_updated_at
"#;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One transaction attempt of the create cycle
    async fn create_once(&self, comment: &Comment) -> Result<i64, TxError> {
        let mut tx = self.pool.begin().await?;

        ensure_post_exists(&mut tx, comment.post_id).await?;

        if let Some(parent_id) = comment.parent_id {
            ensure_parent_on_post(&mut tx, parent_id, comment.post_id).await?;
        }

        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, content, media, parent_id,
                                  likes_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(comment.post_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(&comment.content)
        .bind(comment.media.as_deref())
        .bind(comment.parent_id.map(Snowflake::into_inner))
        .bind(comment.likes_count)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *tx)
        .await?;

        let count = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE posts
            SET comments_count = comments_count + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING comments_count
            "#,
        )
        .bind(comment.post_id.into_inner())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(i64::from(count))
    }

    /// One transaction attempt of the delete cycle
    async fn delete_once(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
    ) -> Result<Option<(Snowflake, i64)>, TxError> {
        let mut tx = self.pool.begin().await?;

        // Ownership is the filter itself: a wrong id and a wrong owner are
        // indistinguishable, and neither decrements anything
        let post_id = sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM comments WHERE id = $1 AND author_id = $2
            RETURNING post_id
            "#,
        )
        .bind(comment_id.into_inner())
        .bind(author_id.into_inner())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(post_id) = post_id else {
            return Ok(None);
        };

        let count = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE posts
            SET comments_count = GREATEST(comments_count - 1, 0), updated_at = NOW()
            WHERE id = $1
            RETURNING comments_count
            "#,
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((Snowflake::new(post_id), i64::from(count))))
    }
}

/// Fail with a definite `PostNotFound` before inserting the fact
async fn ensure_post_exists(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Snowflake,
) -> Result<(), TxError> {
    let exists = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id FROM posts WHERE id = $1
        "#,
    )
    .bind(post_id.into_inner())
    .fetch_optional(&mut **tx)
    .await?;

    if exists.is_none() {
        return Err(DomainError::PostNotFound(post_id).into());
    }
    Ok(())
}

/// A reply's parent must exist and live on the same post
async fn ensure_parent_on_post(
    tx: &mut Transaction<'_, Postgres>,
    parent_id: Snowflake,
    post_id: Snowflake,
) -> Result<(), TxError> {
    let parent_post = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT post_id FROM comments WHERE id = $1
        "#,
    )
    .bind(parent_id.into_inner())
    .fetch_optional(&mut **tx)
    .await?;

    match parent_post {
        None => Err(DomainError::ValidationError(format!(
            "parent comment {parent_id} does not exist"
        ))
        .into()),
        Some(p) if p != post_id.into_inner() => Err(DomainError::ValidationError(format!(
            "parent comment {parent_id} belongs to a different post"
        ))
        .into()),
        Some(_) => Ok(()),
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self, comment), fields(comment_id = %comment.id, post_id = %comment.post_id))]
    async fn create_counted(&self, comment: &Comment) -> RepoResult<i64> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self.create_once(comment).await;
            if let Some(count) = resolve_attempt(result, attempt, "comment.create")? {
                return Ok(count);
            }
        }
    }

    #[instrument(skip(self))]
    async fn update_owned(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
        content: &str,
    ) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            UPDATE comments
            SET content = $3, updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING id, post_id, author_id, content, media, parent_id,
                      likes_count, created_at, updated_at
            "#,
        )
        .bind(comment_id.into_inner())
        .bind(author_id.into_inner())
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn delete_owned(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
    ) -> RepoResult<Option<(Snowflake, i64)>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self.delete_once(comment_id, author_id).await;
            if let Some(outcome) = resolve_attempt(result, attempt, "comment.delete")? {
                return Ok(outcome);
            }
        }
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, post_id, author_id, content, media, parent_id,
                   likes_count, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_with_author(&self, id: Snowflake) -> RepoResult<Option<(Comment, User)>> {
        let sql = format!(
            "SELECT {COMMENT_AUTHOR_COLUMNS} \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.id = $1"
        );
        let result = sqlx::query_as::<_, CommentWithAuthorModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(split_comment_author))
    }

    #[instrument(skip(self))]
    async fn list_page(
        &self,
        post_id: Snowflake,
        offset: i64,
        limit: i64,
    ) -> RepoResult<CommentPage> {
        let limit = limit.clamp(1, 100);
        let offset = offset.max(0);

        let sql = format!(
            "SELECT {COMMENT_AUTHOR_COLUMNS} \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.post_id = $1 \
             ORDER BY c.created_at DESC, c.id DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, CommentWithAuthorModel>(&sql)
            .bind(post_id.into_inner())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = self.count_by_post(post_id).await?;

        Ok(CommentPage {
            rows: rows.into_iter().map(split_comment_author).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM comments WHERE post_id = $1
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
