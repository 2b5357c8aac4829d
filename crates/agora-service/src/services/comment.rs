//! Comment service
//!
//! Comments thread a single level: replies hang off a top-level comment.

use std::collections::HashMap;

use agora_core::entities::{Comment, User};
use agora_core::traits::PageQuery;
use agora_core::value_objects::Snowflake;
use agora_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::{parse_id, PostService};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Top-level comments (newest first) with their replies (oldest first)
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: Snowflake,
        viewer_id: Snowflake,
        page: PageQuery,
    ) -> ServiceResult<Vec<CommentResponse>> {
        // Visibility follows the post
        PostService::new(self.ctx).visible_post(post_id, viewer_id).await?;

        let top_level = self.ctx.comment_repo().find_top_level(post_id, &page).await?;
        let replies = self.ctx.comment_repo().find_replies(post_id).await?;

        let mut authors = HashMap::new();
        for comment in top_level.iter().chain(replies.iter()) {
            if !authors.contains_key(&comment.author_id) {
                let user = self.get_user(comment.author_id).await?;
                authors.insert(comment.author_id, UserResponse::from(&user));
            }
        }

        // Group replies under their parent
        let mut by_parent: HashMap<Snowflake, Vec<CommentResponse>> = HashMap::new();
        for reply in replies {
            let parent = match reply.parent_id {
                Some(parent) => parent,
                None => continue,
            };
            let response = to_response(&reply, &authors, Vec::new());
            by_parent.entry(parent).or_default().push(response);
        }

        Ok(top_level
            .iter()
            .map(|comment| {
                let children = by_parent.remove(&comment.id).unwrap_or_default();
                to_response(comment, &authors, children)
            })
            .collect())
    }

    /// Comment on a post, optionally as a reply
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        post_id: Snowflake,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        // Commenting requires the post to be visible to the caller
        PostService::new(self.ctx).visible_post(post_id, author_id).await?;

        let parent_id = match request.parent_id.as_deref().map(parse_id).transpose()? {
            Some(requested) => Some(self.resolve_parent(post_id, requested).await?),
            None => None,
        };

        let comment = match parent_id {
            Some(parent_id) => Comment::reply(
                self.ctx.generate_id(),
                post_id,
                author_id,
                request.content,
                parent_id,
            ),
            None => Comment::new(self.ctx.generate_id(), post_id, author_id, request.content),
        };

        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        let author = self.get_user(author_id).await?;
        let mut authors = HashMap::new();
        authors.insert(author_id, UserResponse::from(&author));

        Ok(to_response(&comment, &authors, Vec::new()))
    }

    /// Validate the parent and flatten reply-to-reply onto the top-level
    /// comment, keeping threads one level deep.
    async fn resolve_parent(
        &self,
        post_id: Snowflake,
        parent_id: Snowflake,
    ) -> ServiceResult<Snowflake> {
        let parent = self
            .ctx
            .comment_repo()
            .find_by_id(parent_id)
            .await?
            .filter(|parent| parent.post_id == post_id)
            .ok_or(ServiceError::Domain(DomainError::InvalidParentComment))?;

        Ok(parent.parent_id.unwrap_or(parent.id))
    }

    async fn get_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

fn to_response(
    comment: &Comment,
    authors: &HashMap<Snowflake, UserResponse>,
    replies: Vec<CommentResponse>,
) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        author: authors
            .get(&comment.author_id)
            .cloned()
            .unwrap_or_else(|| UserResponse {
                id: comment.author_id.to_string(),
                name: String::new(),
                image: None,
            }),
        content: comment.content.clone(),
        parent_id: comment.parent_id.map(|id| id.to_string()),
        created_at: comment.created_at,
        replies,
    }
}
