//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::entities::Reaction;
use agora_core::error::DomainError;
use agora_core::traits::{ReactionRepository, RepoResult};
use agora_core::value_objects::Snowflake;

use crate::models::ReactionModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReactionRepository
///
/// Uniqueness of (post_id, user_id, kind) is the table's primary key, so
/// concurrent duplicate reactions fail at the constraint rather than in an
/// application-level check.
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_by_post(
        &self,
        post_id: Snowflake,
        kind: Option<&str>,
    ) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT post_id, user_id, kind, created_at
            FROM reactions
            WHERE post_id = $1 AND ($2::text IS NULL OR kind = $2)
            ORDER BY created_at
            ",
        )
        .bind(post_id.into_inner())
        .bind(kind)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self, reaction))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reactions (post_id, user_id, kind, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(reaction.post_id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(&reaction.kind)
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyReacted))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, post_id: Snowflake, user_id: Snowflake, kind: &str) -> RepoResult<()> {
        // Removing an absent reaction is a no-op
        sqlx::query(
            r"
            DELETE FROM reactions WHERE post_id = $1 AND user_id = $2 AND kind = $3
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .bind(kind)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReactionRepository>();
    }
}
