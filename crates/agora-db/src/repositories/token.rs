//! PostgreSQL implementation of AuthTokenRepository
//!
//! Password-reset tokens are one-per-user (upserted); email-verification
//! tokens are one-shot rows deleted on consumption.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use agora_core::traits::{AuthTokenRepository, RepoResult};
use agora_core::value_objects::Snowflake;

use super::error::map_db_error;

/// PostgreSQL implementation of AuthTokenRepository
#[derive(Clone)]
pub struct PgAuthTokenRepository {
    pool: PgPool,
}

impl PgAuthTokenRepository {
    /// Create a new PgAuthTokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthTokenRepository for PgAuthTokenRepository {
    #[instrument(skip(self, token))]
    async fn upsert_password_reset(
        &self,
        user_id: Snowflake,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO password_resets (user_id, email, token, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET token = $3, expires_at = $4
            ",
        )
        .bind(user_id.into_inner())
        .bind(email)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn create_email_verification(
        &self,
        user_id: Snowflake,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO email_verifications (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(token)
        .bind(user_id.into_inner())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn consume_email_verification(&self, token: &str) -> RepoResult<Option<Snowflake>> {
        // Delete the row whether or not it is still valid; only an
        // unexpired token yields a user ID.
        let row = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r"
            DELETE FROM email_verifications
            WHERE token = $1
            RETURNING user_id, expires_at
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.and_then(|(user_id, expires_at)| {
            (expires_at > Utc::now()).then(|| Snowflake::new(user_id))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAuthTokenRepository>();
    }
}
