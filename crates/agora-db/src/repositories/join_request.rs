//! PostgreSQL implementation of JoinRequestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::entities::{JoinRequest, JoinRequestStatus, User};
use agora_core::error::DomainError;
use agora_core::traits::{JoinRequestRepository, RepoResult};
use agora_core::value_objects::Snowflake;

use crate::mappers::{join_request_from_model, join_request_with_user};
use crate::models::{JoinRequestModel, JoinRequestWithUserModel};

use super::error::{join_request_not_found, map_db_error};

/// PostgreSQL implementation of JoinRequestRepository
#[derive(Clone)]
pub struct PgJoinRequestRepository {
    pool: PgPool,
}

impl PgJoinRequestRepository {
    /// Create a new PgJoinRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JoinRequestRepository for PgJoinRequestRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<JoinRequest>> {
        let result = sqlx::query_as::<_, JoinRequestModel>(
            r"
            SELECT group_id, user_id, status, created_at, decided_at, decided_by
            FROM join_requests
            WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(join_request_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending(&self, group_id: Snowflake) -> RepoResult<Vec<(JoinRequest, User)>> {
        let rows = sqlx::query_as::<_, JoinRequestWithUserModel>(
            r"
            SELECT jr.group_id, jr.user_id, jr.status, jr.created_at, jr.decided_at, jr.decided_by,
                   u.name, u.email, u.image, u.email_verified,
                   u.created_at AS user_created_at, u.updated_at AS user_updated_at
            FROM join_requests jr
            JOIN users u ON u.id = jr.user_id
            WHERE jr.group_id = $1 AND jr.status = 'PENDING'
            ORDER BY jr.created_at
            ",
        )
        .bind(group_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(join_request_with_user).collect()
    }

    #[instrument(skip(self, request))]
    async fn create(&self, request: &JoinRequest) -> RepoResult<()> {
        // A previously decided request is re-opened in place; a request
        // that is still PENDING stays untouched and reports a conflict.
        let result = sqlx::query(
            r"
            INSERT INTO join_requests (group_id, user_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (group_id, user_id) DO UPDATE
                SET status = $3, created_at = $4, decided_at = NULL, decided_by = NULL
                WHERE join_requests.status <> 'PENDING'
            ",
        )
        .bind(request.group_id.into_inner())
        .bind(request.user_id.into_inner())
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyRequested);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn decide(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
        status: JoinRequestStatus,
        decided_by: Snowflake,
    ) -> RepoResult<()> {
        // Only PENDING rows are open for a decision
        let result = sqlx::query(
            r"
            UPDATE join_requests
            SET status = $3, decided_at = NOW(), decided_by = $4
            WHERE group_id = $1 AND user_id = $2 AND status = 'PENDING'
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .bind(status.as_str())
        .bind(decided_by.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(join_request_not_found());
        }

        Ok(())
    }
}
