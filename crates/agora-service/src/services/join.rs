//! Join service
//!
//! Joining groups and the private-group approval workflow. Public groups
//! admit immediately; private groups persist a PENDING join request that
//! owners, admins, and moderators review.

use agora_core::entities::{GroupMember, JoinRequest, JoinRequestStatus};
use agora_core::value_objects::{GroupAction, Snowflake};
use agora_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{JoinDecision, JoinRequestResponse, MemberResponse, MemberWithUser};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::PolicyService;

/// Result of a join attempt
#[derive(Debug)]
pub enum JoinOutcome {
    /// Public group: membership was created immediately
    Joined(Box<MemberResponse>),
    /// Private group: a pending request now awaits review
    Requested,
}

/// Join service
pub struct JoinService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> JoinService<'a> {
    /// Create a new JoinService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ask to join a group
    #[instrument(skip(self))]
    pub async fn request_join(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<JoinOutcome> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        if self.ctx.member_repo().is_member(group_id, user_id).await? {
            return Err(ServiceError::Domain(DomainError::AlreadyMember));
        }

        if !group.is_private {
            let member = GroupMember::member(group_id, user_id);
            self.ctx.member_repo().create(&member).await?;

            let user = self
                .ctx
                .user_repo()
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

            info!(group_id = %group_id, user_id = %user_id, "User joined group");

            return Ok(JoinOutcome::Joined(Box::new(MemberResponse::from(
                MemberWithUser { member, user },
            ))));
        }

        let request = JoinRequest::pending(group_id, user_id);
        self.ctx.join_request_repo().create(&request).await?;

        info!(group_id = %group_id, user_id = %user_id, "Join request created");

        Ok(JoinOutcome::Requested)
    }

    /// Pending requests for a group (reviewers only)
    #[instrument(skip(self))]
    pub async fn list_pending(
        &self,
        group_id: Snowflake,
        viewer_id: Snowflake,
    ) -> ServiceResult<Vec<JoinRequestResponse>> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        policy
            .require(
                &group,
                viewer_id,
                GroupAction::ReviewJoinRequests,
                "manage join requests",
            )
            .await?;

        let pending = self.ctx.join_request_repo().find_pending(group_id).await?;

        Ok(pending.into_iter().map(JoinRequestResponse::from).collect())
    }

    /// Decide a pending request
    ///
    /// Approval flips the request to APPROVED and creates the MEMBER row;
    /// rejection only records the decision.
    #[instrument(skip(self))]
    pub async fn review(
        &self,
        group_id: Snowflake,
        actor_id: Snowflake,
        target_id: Snowflake,
        decision: JoinDecision,
    ) -> ServiceResult<Option<MemberResponse>> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        policy
            .require(
                &group,
                actor_id,
                GroupAction::ReviewJoinRequests,
                "manage join requests",
            )
            .await?;

        let status = match decision {
            JoinDecision::Accept => JoinRequestStatus::Approved,
            JoinDecision::Reject => JoinRequestStatus::Rejected,
        };

        // Fails with JoinRequestNotFound when nothing is pending
        self.ctx
            .join_request_repo()
            .decide(group_id, target_id, status, actor_id)
            .await?;

        if decision == JoinDecision::Reject {
            info!(group_id = %group_id, user_id = %target_id, actor_id = %actor_id, "Join request rejected");
            return Ok(None);
        }

        let member = GroupMember::member(group_id, target_id);
        self.ctx.member_repo().create(&member).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        info!(group_id = %group_id, user_id = %target_id, actor_id = %actor_id, "Join request approved");

        Ok(Some(MemberResponse::from(MemberWithUser { member, user })))
    }
}

#[cfg(test)]
mod tests {
    // Covered end-to-end by the integration test suite
}
