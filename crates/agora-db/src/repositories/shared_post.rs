//! PostgreSQL implementation of SharedPostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::entities::SharedPost;
use agora_core::traits::{RepoResult, SharedPostRepository};
use agora_core::value_objects::Snowflake;

use crate::models::SharedPostModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SharedPostRepository
#[derive(Clone)]
pub struct PgSharedPostRepository {
    pool: PgPool,
}

impl PgSharedPostRepository {
    /// Create a new PgSharedPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SharedPostRepository for PgSharedPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SharedPost>> {
        let result = sqlx::query_as::<_, SharedPostModel>(
            r"
            SELECT id, post_id, sharer_id, receiver_id, message, created_at
            FROM shared_posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SharedPost::from))
    }

    #[instrument(skip(self, shared))]
    async fn create(&self, shared: &SharedPost) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO shared_posts (id, post_id, sharer_id, receiver_id, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(shared.id.into_inner())
        .bind(shared.post_id.into_inner())
        .bind(shared.sharer_id.into_inner())
        .bind(shared.receiver_id.into_inner())
        .bind(&shared.message)
        .bind(shared.created_at)
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
        assert_send_sync::<PgSharedPostRepository>();
    }
}
