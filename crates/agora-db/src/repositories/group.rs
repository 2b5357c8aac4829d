//! PostgreSQL implementation of GroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::entities::Group;
use agora_core::error::DomainError;
use agora_core::traits::{GroupListQuery, GroupRepository, RepoResult};
use agora_core::value_objects::Snowflake;

use crate::models::GroupModel;

use super::error::{group_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of GroupRepository
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Create a new PgGroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Visibility predicate shared by the list and count queries: when
// only_member is set the viewer must hold a membership row, otherwise
// public groups and the viewer's own private groups qualify.
const VISIBLE_GROUPS_WHERE: &str = r"
    ($2::text IS NULL OR g.name ILIKE '%' || $2 || '%' OR g.description ILIKE '%' || $2 || '%')
    AND (
        CASE WHEN $3 THEN
            EXISTS(SELECT 1 FROM group_members gm WHERE gm.group_id = g.id AND gm.user_id = $1)
        ELSE
            NOT g.is_private
            OR EXISTS(SELECT 1 FROM group_members gm WHERE gm.group_id = g.id AND gm.user_id = $1)
        END
    )
";

#[async_trait]
impl GroupRepository for PgGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT id, name, slug, description, is_private, owner_id, created_at, updated_at
            FROM groups
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str, exclude: Option<Snowflake>) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM groups
                WHERE slug = $1 AND ($2::bigint IS NULL OR id <> $2)
            )
            ",
        )
        .bind(slug)
        .bind(exclude.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, query))]
    async fn list(
        &self,
        viewer_id: Snowflake,
        query: &GroupListQuery,
    ) -> RepoResult<(Vec<Group>, i64)> {
        let list_sql = format!(
            r"
            SELECT g.id, g.name, g.slug, g.description, g.is_private, g.owner_id, g.created_at, g.updated_at
            FROM groups g
            WHERE {VISIBLE_GROUPS_WHERE}
            ORDER BY g.created_at DESC
            LIMIT $4 OFFSET $5
            "
        );
        let count_sql = format!("SELECT COUNT(*) FROM groups g WHERE {VISIBLE_GROUPS_WHERE}");

        let rows = sqlx::query_as::<_, GroupModel>(&list_sql)
            .bind(viewer_id.into_inner())
            .bind(query.search.as_deref())
            .bind(query.only_member)
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(viewer_id.into_inner())
            .bind(query.search.as_deref())
            .bind(query.only_member)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok((rows.into_iter().map(Group::from).collect(), total))
    }

    #[instrument(skip(self, group))]
    async fn create(&self, group: &Group) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO groups (id, name, slug, description, is_private, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(group.id.into_inner())
        .bind(&group.name)
        .bind(&group.slug)
        .bind(&group.description)
        .bind(group.is_private)
        .bind(group.owner_id.into_inner())
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken))?;

        Ok(())
    }

    #[instrument(skip(self, group))]
    async fn update(&self, group: &Group) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE groups
            SET name = $2, slug = $3, description = $4, is_private = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(group.id.into_inner())
        .bind(&group.name)
        .bind(&group.slug)
        .bind(&group.description)
        .bind(group.is_private)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken))?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(group.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM groups WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, group_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM group_members WHERE group_id = $1
            ",
        )
        .bind(group_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn post_count(&self, group_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM posts WHERE group_id = $1 AND published
            ",
        )
        .bind(group_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgGroupRepository>();
    }
}
