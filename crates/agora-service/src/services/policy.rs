//! Policy service
//!
//! The one place that turns (caller, group, action) into allow/deny.
//! Loads the group and the caller's membership row, builds an
//! [`Actor`], and delegates the decision to the pure policy table in
//! `agora-core`.

use agora_core::entities::Group;
use agora_core::value_objects::{Actor, GroupAction, Snowflake};
use agora_core::DomainError;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Policy service for group access control
pub struct PolicyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PolicyService<'a> {
    /// Create a new PolicyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a group or fail with NotFound
    #[instrument(skip(self))]
    pub async fn get_group(&self, group_id: Snowflake) -> ServiceResult<Group> {
        self.ctx
            .group_repo()
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Group", group_id.to_string()))
    }

    /// Build the caller's [`Actor`] for a group
    #[instrument(skip(self, group))]
    pub async fn actor(&self, group: &Group, user_id: Snowflake) -> ServiceResult<Actor> {
        if group.is_owner(user_id) {
            return Ok(Actor::owner());
        }

        let member = self.ctx.member_repo().find(group.id, user_id).await?;
        Ok(match member {
            Some(member) => Actor::with_role(member.role),
            None => Actor::non_member(),
        })
    }

    /// Check an action, returning the actor on success
    ///
    /// `denied` completes the sentence "You do not have permission to ..."
    /// in the error body.
    #[instrument(skip(self, group))]
    pub async fn require(
        &self,
        group: &Group,
        user_id: Snowflake,
        action: GroupAction,
        denied: &'static str,
    ) -> ServiceResult<Actor> {
        let actor = self.actor(group, user_id).await?;

        if !actor.allows(group.is_private, action) {
            debug!(
                group_id = %group.id,
                user_id = %user_id,
                ?action,
                "Group action denied"
            );
            return Err(ServiceError::Domain(DomainError::AccessDenied(denied)));
        }

        Ok(actor)
    }

    /// Check membership without an action (for visibility predicates)
    #[instrument(skip(self))]
    pub async fn is_member(&self, group_id: Snowflake, user_id: Snowflake) -> ServiceResult<bool> {
        self.ctx
            .member_repo()
            .is_member(group_id, user_id)
            .await
            .map_err(ServiceError::from)
    }
}
