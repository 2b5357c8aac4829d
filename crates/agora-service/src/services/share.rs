//! Share service
//!
//! Sharing a post creates a SharedPost record plus the Message that
//! carries it; the record is readable only by sharer and receiver.

use agora_core::entities::{Message, SharedPost, User};
use agora_core::value_objects::Snowflake;
use agora_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    MessageResponse, SharedPostPreview, SharedPostResponse, SharePostRequest, ShareResponse,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::parse_id;

/// Share service
pub struct ShareService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShareService<'a> {
    /// Create a new ShareService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Share a published post with another user
    #[instrument(skip(self, request))]
    pub async fn share_post(
        &self,
        sharer_id: Snowflake,
        request: SharePostRequest,
    ) -> ServiceResult<ShareResponse> {
        let post_id = parse_id(&request.post_id)?;
        let receiver_id = parse_id(&request.receiver_id)?;

        // Only published posts can be shared
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(|post| post.published)
            .ok_or(ServiceError::Domain(DomainError::PostNotFound(post_id)))?;

        let receiver = self.get_user(receiver_id).await?;
        let sharer = self.get_user(sharer_id).await?;
        let author = self.get_user(post.author_id).await?;

        let custom_message = request
            .message
            .as_deref()
            .filter(|message| !message.is_empty());

        let shared = SharedPost::new(
            self.ctx.generate_id(),
            post_id,
            sharer_id,
            receiver_id,
            custom_message.map(str::to_string),
        );
        self.ctx.shared_post_repo().create(&shared).await?;

        // The carrying message defaults to a templated reference
        let content = custom_message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Shared a post: {}", post.title));

        let message = Message::new(self.ctx.generate_id(), sharer_id, receiver_id, content)
            .with_shared_post(shared.id);
        self.ctx.message_repo().create(&message).await?;

        info!(
            shared_post_id = %shared.id,
            post_id = %post_id,
            sharer_id = %sharer_id,
            receiver_id = %receiver_id,
            "Post shared"
        );

        Ok(ShareResponse {
            shared_post: SharedPostResponse {
                id: shared.id.to_string(),
                post: SharedPostPreview {
                    id: post.id.to_string(),
                    title: post.title.clone(),
                    content: post.content.clone(),
                    author: UserResponse::from(&author),
                },
                sharer: UserResponse::from(&sharer),
                receiver_id: receiver_id.to_string(),
                message: shared.message.clone(),
                created_at: shared.created_at,
            },
            message: MessageResponse::from_parts(&message, &sharer, &receiver),
        })
    }

    /// Fetch a shared-post record (sharer or receiver only)
    #[instrument(skip(self))]
    pub async fn get_shared_post(
        &self,
        shared_post_id: Snowflake,
        viewer_id: Snowflake,
    ) -> ServiceResult<SharedPostResponse> {
        let shared = self
            .ctx
            .shared_post_repo()
            .find_by_id(shared_post_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::SharedPostNotFound(
                shared_post_id,
            )))?;

        if !shared.involves(viewer_id) {
            return Err(ServiceError::Domain(DomainError::AccessDenied(
                "view this shared post",
            )));
        }

        let post = self
            .ctx
            .post_repo()
            .find_by_id(shared.post_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::PostNotFound(shared.post_id)))?;
        let author = self.get_user(post.author_id).await?;
        let sharer = self.get_user(shared.sharer_id).await?;

        Ok(SharedPostResponse {
            id: shared.id.to_string(),
            post: SharedPostPreview {
                id: post.id.to_string(),
                title: post.title,
                content: post.content,
                author: UserResponse::from(&author),
            },
            sharer: UserResponse::from(&sharer),
            receiver_id: shared.receiver_id.to_string(),
            message: shared.message,
            created_at: shared.created_at,
        })
    }

    async fn get_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    // Covered end-to-end by the integration test suite
}
