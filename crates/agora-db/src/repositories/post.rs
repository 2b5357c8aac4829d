//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::entities::Post;
use agora_core::traits::{PostListQuery, PostRepository, RepoResult};
use agora_core::value_objects::Snowflake;

use crate::models::PostModel;

use super::error::{map_db_error, post_not_found};

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

// Listing filter shared by the list and count queries. Only published
// posts are listed, and posts inside a private group are visible to its
// members alone.
const POSTS_WHERE: &str = r"
    p.published
    AND ($2::bigint IS NULL OR p.group_id = $2)
    AND ($3::bigint IS NULL OR p.author_id = $3)
    AND (
        p.group_id IS NULL
        OR EXISTS(SELECT 1 FROM groups g WHERE g.id = p.group_id AND NOT g.is_private)
        OR EXISTS(
            SELECT 1 FROM group_members gm
            WHERE gm.group_id = p.group_id AND gm.user_id = $1
        )
    )
";

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, title, content, author_id, group_id, published, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, query))]
    async fn list(
        &self,
        viewer_id: Snowflake,
        query: &PostListQuery,
    ) -> RepoResult<(Vec<Post>, i64)> {
        let list_sql = format!(
            r"
            SELECT p.id, p.title, p.content, p.author_id, p.group_id, p.published, p.created_at, p.updated_at
            FROM posts p
            WHERE {POSTS_WHERE}
            ORDER BY p.created_at DESC
            LIMIT $4 OFFSET $5
            "
        );
        let count_sql = format!("SELECT COUNT(*) FROM posts p WHERE {POSTS_WHERE}");

        let group_id = query.group_id.map(Snowflake::into_inner);
        let author_id = query.author_id.map(Snowflake::into_inner);

        let rows = sqlx::query_as::<_, PostModel>(&list_sql)
            .bind(viewer_id.into_inner())
            .bind(group_id)
            .bind(author_id)
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(viewer_id.into_inner())
            .bind(group_id)
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok((rows.into_iter().map(Post::from).collect(), total))
    }

    #[instrument(skip(self, post))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, title, content, author_id, group_id, published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id.into_inner())
        .bind(post.group_id.map(Snowflake::into_inner))
        .bind(post.published)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET title = $2, content = $3, published = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.published)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM posts WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn comment_count(&self, post_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM comments WHERE post_id = $1
            ",
        )
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn reaction_count(&self, post_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM reactions WHERE post_id = $1
            ",
        )
        .bind(post_id.into_inner())
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
        assert_send_sync::<PgPostRepository>();
    }
}
