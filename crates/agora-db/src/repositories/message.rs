//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::entities::Message;
use agora_core::traits::{MessageRepository, RepoResult};
use agora_core::value_objects::Snowflake;

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO messages (id, sender_id, receiver_id, content, read, shared_post_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.receiver_id.into_inner())
        .bind(&message.content)
        .bind(message.read)
        .bind(message.shared_post_id.map(Snowflake::into_inner))
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_thread(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, sender_id, receiver_id, content, read, shared_post_id, created_at
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at
            ",
        )
        .bind(user_a.into_inner())
        .bind(user_b.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_involving(&self, user_id: Snowflake) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, sender_id, receiver_id, content, read, shared_post_id, created_at
            FROM messages
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read_from(
        &self,
        sender_id: Snowflake,
        receiver_id: Snowflake,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE messages
            SET read = TRUE
            WHERE sender_id = $1 AND receiver_id = $2 AND NOT read
            ",
        )
        .bind(sender_id.into_inner())
        .bind(receiver_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMessageRepository>();
    }
}
