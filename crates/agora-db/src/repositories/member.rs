//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::entities::{GroupMember, User};
use agora_core::error::DomainError;
use agora_core::traits::{MemberListQuery, MemberRepository, RepoResult};
use agora_core::value_objects::{GroupRole, Snowflake};

use crate::mappers::{member_from_model, member_with_user};
use crate::models::{GroupMemberModel, MemberWithUserModel};

use super::error::{map_db_error, map_unique_violation, member_not_found};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Roster filter shared by the list and count queries. Search and role are
// applied in SQL so the total count matches the filtered rows (a page of
// filtered results is paginated consistently).
const ROSTER_WHERE: &str = r"
    gm.group_id = $1
    AND ($2::text IS NULL OR gm.role = $2)
    AND ($3::text IS NULL OR u.name ILIKE '%' || $3 || '%' OR u.email ILIKE '%' || $3 || '%')
";

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<GroupMember>> {
        let result = sqlx::query_as::<_, GroupMemberModel>(
            r"
            SELECT group_id, user_id, role, joined_at, updated_at
            FROM group_members
            WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(member_from_model).transpose()
    }

    #[instrument(skip(self, query))]
    async fn find_by_group(
        &self,
        group_id: Snowflake,
        query: &MemberListQuery,
    ) -> RepoResult<(Vec<(GroupMember, User)>, i64)> {
        let list_sql = format!(
            r"
            SELECT gm.group_id, gm.user_id, gm.role, gm.joined_at, gm.updated_at,
                   u.name, u.email, u.image, u.email_verified,
                   u.created_at AS user_created_at, u.updated_at AS user_updated_at
            FROM group_members gm
            JOIN users u ON u.id = gm.user_id
            WHERE {ROSTER_WHERE}
            ORDER BY CASE gm.role WHEN 'ADMIN' THEN 0 WHEN 'MODERATOR' THEN 1 ELSE 2 END,
                     gm.joined_at
            LIMIT $4 OFFSET $5
            "
        );
        let count_sql = format!(
            r"
            SELECT COUNT(*)
            FROM group_members gm
            JOIN users u ON u.id = gm.user_id
            WHERE {ROSTER_WHERE}
            "
        );

        let role = query.role.map(|role| role.as_str());

        let rows = sqlx::query_as::<_, MemberWithUserModel>(&list_sql)
            .bind(group_id.into_inner())
            .bind(role)
            .bind(query.search.as_deref())
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(group_id.into_inner())
            .bind(role)
            .bind(query.search.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let members = rows
            .into_iter()
            .map(member_with_user)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((members, total))
    }

    #[instrument(skip(self))]
    async fn is_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM group_members WHERE group_id = $1 AND user_id = $2)
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, member))]
    async fn create(&self, member: &GroupMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO group_members (group_id, user_id, role, joined_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(member.group_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_role(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
        role: GroupRole,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE group_members
            SET role = $3, updated_at = NOW()
            WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM group_members WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }
}
