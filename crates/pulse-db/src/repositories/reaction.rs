//! PostgreSQL implementation of ReactionRepository
//!
//! Carries the reaction engine: each apply/clear runs as one transaction
//! that locks the caller's fact row, executes the planned transition, writes
//! the counter deltas with single-statement clamped arithmetic, and reads
//! the aggregate snapshot before committing. Transient conflicts retry from
//! the read step.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use pulse_core::entities::{PostAggregate, Reaction, ReactionTransition};
use pulse_core::error::DomainError;
use pulse_core::traits::{ClearOutcome, ReactionOutcome, ReactionRepository, RepoResult};
use pulse_core::value_objects::{ReactionKind, Snowflake};

use crate::mappers::bucket_column;
use crate::models::{PostAggregateModel, ReactionCountModel, ReactionModel};

use super::error::{map_db_error, resolve_attempt, TxError};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One transaction attempt of the apply cycle
    async fn apply_once(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> Result<ReactionOutcome, TxError> {
        let mut tx = self.pool.begin().await?;

        ensure_post_exists(&mut tx, post_id).await?;

        // Lock the pair's fact row; same-pair operations serialize here
        let prev = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, user_id, kind, created_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await?
        .map(Reaction::from);

        let transition = ReactionTransition::plan(prev.as_ref().map(|r| r.kind), kind);

        let reaction = match transition {
            ReactionTransition::Create => {
                let now = Utc::now();
                sqlx::query(
                    r#"
                    INSERT INTO reactions (post_id, user_id, kind, created_at)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(post_id.into_inner())
                .bind(user_id.into_inner())
                .bind(kind.as_str())
                .bind(now)
                .execute(&mut *tx)
                .await?;

                let bucket = bucket_column(kind);
                let sql = format!(
                    "UPDATE posts \
                     SET {bucket} = {bucket} + 1, likes_count = likes_count + 1, updated_at = NOW() \
                     WHERE id = $1"
                );
                sqlx::query(&sql)
                    .bind(post_id.into_inner())
                    .execute(&mut *tx)
                    .await?;

                Some(Reaction {
                    post_id,
                    user_id,
                    kind,
                    created_at: now,
                })
            }
            ReactionTransition::Switch { from } => {
                sqlx::query(
                    r#"
                    UPDATE reactions SET kind = $3 WHERE post_id = $1 AND user_id = $2
                    "#,
                )
                .bind(post_id.into_inner())
                .bind(user_id.into_inner())
                .bind(kind.as_str())
                .execute(&mut *tx)
                .await?;

                let old = bucket_column(from);
                let new = bucket_column(kind);
                // One reaction, relabeled: the total stays put
                let sql = format!(
                    "UPDATE posts \
                     SET {old} = GREATEST({old} - 1, 0), {new} = {new} + 1, updated_at = NOW() \
                     WHERE id = $1"
                );
                sqlx::query(&sql)
                    .bind(post_id.into_inner())
                    .execute(&mut *tx)
                    .await?;

                prev.map(|r| Reaction { kind, ..r })
            }
            ReactionTransition::Remove => {
                sqlx::query(
                    r#"
                    DELETE FROM reactions WHERE post_id = $1 AND user_id = $2
                    "#,
                )
                .bind(post_id.into_inner())
                .bind(user_id.into_inner())
                .execute(&mut *tx)
                .await?;

                let sql = removal_counter_sql(kind);
                sqlx::query(&sql)
                    .bind(post_id.into_inner())
                    .execute(&mut *tx)
                    .await?;

                None
            }
        };

        let aggregate = fetch_aggregate(&mut tx, post_id).await?;
        tx.commit().await?;

        Ok(ReactionOutcome {
            transition,
            reaction,
            aggregate,
        })
    }

    /// One transaction attempt of the clear cycle
    async fn clear_once(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<ClearOutcome, TxError> {
        let mut tx = self.pool.begin().await?;

        ensure_post_exists(&mut tx, post_id).await?;

        let prev = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, user_id, kind, created_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await?
        .map(Reaction::from);

        let removed = match prev {
            Some(reaction) => {
                sqlx::query(
                    r#"
                    DELETE FROM reactions WHERE post_id = $1 AND user_id = $2
                    "#,
                )
                .bind(post_id.into_inner())
                .bind(user_id.into_inner())
                .execute(&mut *tx)
                .await?;

                let sql = removal_counter_sql(reaction.kind);
                sqlx::query(&sql)
                    .bind(post_id.into_inner())
                    .execute(&mut *tx)
                    .await?;

                Some(reaction.kind)
            }
            // Nothing to remove: no decrements, return the aggregate as-is
            None => None,
        };

        let aggregate = fetch_aggregate(&mut tx, post_id).await?;
        tx.commit().await?;

        Ok(ClearOutcome { removed, aggregate })
    }
}

/// Fail with a definite `PostNotFound` before touching any fact
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

/// Read the counter snapshot inside the transaction, after its writes
async fn fetch_aggregate(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Snowflake,
) -> Result<PostAggregate, TxError> {
    let model = sqlx::query_as::<_, PostAggregateModel>(
        r#"
        SELECT id, reactions_like, reactions_love, reactions_haha,
               reactions_wow, reactions_sad, reactions_angry,
               likes_count, comments_count
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id.into_inner())
    .fetch_one(&mut **tx)
    .await?;

    Ok(PostAggregate::from(model))
}

/// Statement removing one reaction of `kind`: the bucket decrements clamped
/// at zero, and the total is recomputed as the sum of all buckets (with the
/// target bucket's clamped value), which also heals any prior drift.
fn removal_counter_sql(kind: ReactionKind) -> String {
    let target = bucket_column(kind);
    let clamped = format!("GREATEST({target} - 1, 0)");

    let sum = ReactionKind::ALL
        .iter()
        .map(|&k| {
            if k == kind {
                clamped.clone()
            } else {
                bucket_column(k).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" + ");

    format!(
        "UPDATE posts \
         SET {target} = {clamped}, likes_count = {sum}, updated_at = NOW() \
         WHERE id = $1"
    )
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, user_id, kind, created_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn apply(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self.apply_once(post_id, user_id, kind).await;
            if let Some(outcome) = resolve_attempt(result, attempt, "reaction.apply")? {
                return Ok(outcome);
            }
        }
    }

    #[instrument(skip(self))]
    async fn clear(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<ClearOutcome> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self.clear_once(post_id, user_id).await;
            if let Some(outcome) = resolve_attempt(result, attempt, "reaction.clear")? {
                return Ok(outcome);
            }
        }
    }

    #[instrument(skip(self))]
    async fn count_by_kind(&self, post_id: Snowflake) -> RepoResult<Vec<(ReactionKind, i64)>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT kind, COUNT(*) as count
            FROM reactions
            WHERE post_id = $1
            GROUP BY kind
            ORDER BY count DESC
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .filter_map(|r| ReactionKind::from_str_opt(&r.kind).map(|kind| (kind, r.count)))
            .collect())
    }
}
