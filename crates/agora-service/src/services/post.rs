//! Post service
//!
//! Post CRUD with group-scoped visibility. Private-group posts are
//! readable by members only; editing and deleting belong to the author
//! or to a moderator/admin of the post's group.

use agora_core::entities::{Post, User};
use agora_core::traits::PostListQuery;
use agora_core::value_objects::{GroupAction, Snowflake};
use agora_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, PaginatedResponse, PostResponse, PostWithMeta, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::PolicyService;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List published posts, optionally scoped to a group or author
    #[instrument(skip(self, query))]
    pub async fn list_posts(
        &self,
        viewer_id: Snowflake,
        query: PostListQuery,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        if let Some(group_id) = query.group_id {
            let policy = PolicyService::new(self.ctx);
            let group = policy.get_group(group_id).await?;
            policy
                .require(&group, viewer_id, GroupAction::ViewPosts, "view this group")
                .await?;
        }

        let page = query.page;
        let (posts, total) = self.ctx.post_repo().list(viewer_id, &query).await?;

        let mut responses = Vec::with_capacity(posts.len());
        for post in posts {
            responses.push(self.build_response(post).await?);
        }

        Ok(PaginatedResponse::new(responses, page.page, page.limit, total))
    }

    /// Create a post, optionally inside a group (members only)
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let group_id = request
            .group_id
            .as_deref()
            .map(parse_id)
            .transpose()?;

        if let Some(group_id) = group_id {
            let policy = PolicyService::new(self.ctx);
            let group = policy.get_group(group_id).await?;
            policy
                .require(
                    &group,
                    author_id,
                    GroupAction::CreatePost,
                    "create posts in this group",
                )
                .await?;
        }

        let post = Post::new(
            self.ctx.generate_id(),
            request.title,
            request.content,
            author_id,
            group_id,
        );
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        self.build_response(post).await
    }

    /// Get one post; group visibility and the published flag apply
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake, viewer_id: Snowflake) -> ServiceResult<PostResponse> {
        let post = self.visible_post(post_id, viewer_id).await?;
        self.build_response(post).await
    }

    /// Update a post (author, or group moderator/admin)
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        post_id: Snowflake,
        actor_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self.find_post(post_id).await?;
        self.require_can_edit(&post, actor_id).await?;

        let mut changed = false;

        if let Some(title) = request.title {
            post.set_title(title);
            changed = true;
        }
        if let Some(content) = request.content {
            post.set_content(content);
            changed = true;
        }
        if let Some(published) = request.published {
            post.set_published(published);
            changed = true;
        }

        if changed {
            self.ctx.post_repo().update(&post).await?;
            info!(post_id = %post.id, actor_id = %actor_id, "Post updated");
        }

        self.build_response(post).await
    }

    /// Delete a post (author, or group moderator/admin)
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let post = self.find_post(post_id).await?;
        self.require_can_edit(&post, actor_id).await?;

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, actor_id = %actor_id, "Post deleted");

        Ok(())
    }

    /// Load a post, applying group visibility and the published flag.
    /// Used by the comment and reaction services as well.
    pub(crate) async fn visible_post(
        &self,
        post_id: Snowflake,
        viewer_id: Snowflake,
    ) -> ServiceResult<Post> {
        let post = self.find_post(post_id).await?;

        // Unpublished posts exist only for their author
        if !post.published && !post.is_author(viewer_id) {
            return Err(ServiceError::Domain(DomainError::PostNotFound(post_id)));
        }

        if let Some(group_id) = post.group_id {
            let policy = PolicyService::new(self.ctx);
            let group = policy.get_group(group_id).await?;
            policy
                .require(&group, viewer_id, GroupAction::ViewPosts, "view this group")
                .await?;
        }

        Ok(post)
    }

    async fn find_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::PostNotFound(post_id)))
    }

    /// Author always; otherwise ModerateContent in the post's group
    async fn require_can_edit(&self, post: &Post, actor_id: Snowflake) -> ServiceResult<()> {
        if post.is_author(actor_id) {
            return Ok(());
        }

        match post.group_id {
            Some(group_id) => {
                let policy = PolicyService::new(self.ctx);
                let group = policy.get_group(group_id).await?;
                policy
                    .require(
                        &group,
                        actor_id,
                        GroupAction::ModerateContent,
                        "moderate posts in this group",
                    )
                    .await?;
                Ok(())
            }
            None => Err(ServiceError::Domain(DomainError::NotPostAuthor)),
        }
    }

    async fn build_response(&self, post: Post) -> ServiceResult<PostResponse> {
        let author = self.get_user(post.author_id).await?;
        let comment_count = self.ctx.post_repo().comment_count(post.id).await?;
        let reaction_count = self.ctx.post_repo().reaction_count(post.id).await?;

        Ok(PostResponse::from(PostWithMeta {
            post,
            author,
            comment_count,
            reaction_count,
        }))
    }

    async fn get_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

/// Parse a Snowflake carried as a string in a request body
pub(crate) fn parse_id(raw: &str) -> ServiceResult<Snowflake> {
    raw.parse()
        .map_err(|_| ServiceError::validation("Invalid ID format"))
}
