//! Reaction service
//!
//! One reaction per (post, user, kind); the storage key enforces it.

use agora_core::entities::{Reaction, User};
use agora_core::value_objects::Snowflake;
use tracing::{info, instrument};

use crate::dto::{AddReactionRequest, ReactionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::PostService;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reactions on a post, optionally filtered by kind
    #[instrument(skip(self))]
    pub async fn list_reactions(
        &self,
        post_id: Snowflake,
        viewer_id: Snowflake,
        kind: Option<&str>,
    ) -> ServiceResult<Vec<ReactionResponse>> {
        PostService::new(self.ctx).visible_post(post_id, viewer_id).await?;

        let reactions = self.ctx.reaction_repo().find_by_post(post_id, kind).await?;

        let mut responses = Vec::with_capacity(reactions.len());
        for reaction in &reactions {
            let user = self.get_user(reaction.user_id).await?;
            responses.push(ReactionResponse::from_parts(reaction, &user));
        }

        Ok(responses)
    }

    /// React to a post; a duplicate (post, user, kind) is a conflict
    #[instrument(skip(self, request))]
    pub async fn add_reaction(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        request: AddReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        PostService::new(self.ctx).visible_post(post_id, user_id).await?;

        let reaction = Reaction::new(post_id, user_id, request.kind);
        self.ctx.reaction_repo().create(&reaction).await?;

        info!(post_id = %post_id, user_id = %user_id, kind = %reaction.kind, "Reaction added");

        let user = self.get_user(user_id).await?;
        Ok(ReactionResponse::from_parts(&reaction, &user))
    }

    /// Remove the caller's reaction of the given kind (no-op if absent)
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: &str,
    ) -> ServiceResult<()> {
        self.ctx.reaction_repo().delete(post_id, user_id, kind).await?;

        info!(post_id = %post_id, user_id = %user_id, kind = %kind, "Reaction removed");

        Ok(())
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
