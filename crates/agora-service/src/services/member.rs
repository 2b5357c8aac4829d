//! Member service
//!
//! Handles the group roster: listing, adding, role changes, and removal.

use agora_core::entities::GroupMember;
use agora_core::traits::MemberListQuery;
use agora_core::value_objects::{GroupAction, GroupRole, Snowflake};
use agora_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    AddMemberRequest, MemberResponse, MemberWithUser, PaginatedResponse, UpdateMemberRoleRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::PolicyService;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the roster (membership required for private groups)
    #[instrument(skip(self, query))]
    pub async fn list_members(
        &self,
        group_id: Snowflake,
        viewer_id: Snowflake,
        query: MemberListQuery,
    ) -> ServiceResult<PaginatedResponse<MemberResponse>> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        policy
            .require(
                &group,
                viewer_id,
                GroupAction::ViewMembers,
                "view this group's members",
            )
            .await?;

        let page = query.page;
        let (members, total) = self.ctx.member_repo().find_by_group(group_id, &query).await?;

        let responses = members
            .into_iter()
            .map(|(member, user)| MemberResponse::from(MemberWithUser { member, user }))
            .collect();

        Ok(PaginatedResponse::new(responses, page.page, page.limit, total))
    }

    /// Add a member directly (ADMIN/MODERATOR; granting ADMIN is owner-only)
    #[instrument(skip(self, request))]
    pub async fn add_member(
        &self,
        group_id: Snowflake,
        actor_id: Snowflake,
        request: AddMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        policy
            .require(
                &group,
                actor_id,
                GroupAction::AddMember,
                "add members to this group",
            )
            .await?;

        if request.role == GroupRole::Admin {
            policy
                .require(&group, actor_id, GroupAction::GrantAdmin, "add admins")
                .await?;
        }

        let target_id = parse_user_id(&request.user_id)?;
        let user = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        if self.ctx.member_repo().is_member(group_id, target_id).await? {
            return Err(ServiceError::Domain(DomainError::AlreadyMember));
        }

        let member = GroupMember::new(group_id, target_id, request.role);
        self.ctx.member_repo().create(&member).await?;

        info!(
            group_id = %group_id,
            user_id = %target_id,
            role = %member.role,
            actor_id = %actor_id,
            "Member added"
        );

        Ok(MemberResponse::from(MemberWithUser { member, user }))
    }

    /// Change a member's role (owner only)
    #[instrument(skip(self, request))]
    pub async fn update_role(
        &self,
        group_id: Snowflake,
        actor_id: Snowflake,
        target_id: Snowflake,
        request: UpdateMemberRoleRequest,
    ) -> ServiceResult<MemberResponse> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        policy
            .require(&group, actor_id, GroupAction::UpdateRole, "update member roles")
            .await?;

        // The owner's row stays ADMIN for as long as they own the group
        if group.is_owner(target_id) {
            return Err(ServiceError::Domain(DomainError::CannotDemoteOwner));
        }

        let mut member = self
            .ctx
            .member_repo()
            .find(group_id, target_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::MemberNotFound))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        self.ctx
            .member_repo()
            .update_role(group_id, target_id, request.role)
            .await?;
        member.set_role(request.role);

        info!(
            group_id = %group_id,
            user_id = %target_id,
            role = %request.role,
            "Member role updated"
        );

        Ok(MemberResponse::from(MemberWithUser { member, user }))
    }

    /// Remove a member
    ///
    /// Self-removal is always allowed except for the owner; removing
    /// someone else goes through the role policy (the target's role
    /// decides who may remove them).
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        group_id: Snowflake,
        actor_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<()> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        // The owner's row can never be removed, not even by themselves
        if group.is_owner(target_id) {
            return Err(ServiceError::Domain(DomainError::CannotRemoveOwner));
        }

        let target = self
            .ctx
            .member_repo()
            .find(group_id, target_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::MemberNotFound))?;

        if actor_id != target_id {
            policy
                .require(
                    &group,
                    actor_id,
                    GroupAction::RemoveMember { target: target.role },
                    "remove members from this group",
                )
                .await?;
        }

        self.ctx.member_repo().delete(group_id, target_id).await?;

        info!(
            group_id = %group_id,
            user_id = %target_id,
            actor_id = %actor_id,
            "Member removed"
        );

        Ok(())
    }
}

/// Parse a Snowflake carried as a string in a request body
pub(crate) fn parse_user_id(raw: &str) -> ServiceResult<Snowflake> {
    raw.parse()
        .map_err(|_| ServiceError::validation("Invalid user_id format"))
}
