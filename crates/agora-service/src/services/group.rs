//! Group service
//!
//! Handles group creation, listing, settings, and deletion.

use agora_core::entities::{Group, GroupMember, User};
use agora_core::traits::GroupListQuery;
use agora_core::value_objects::{slugify, GroupAction, GroupRole, Snowflake};
use agora_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CreateGroupRequest, GroupResponse, GroupWithMeta, PaginatedResponse, UpdateGroupRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::PolicyService;

/// Group service
pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    /// Create a new GroupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new group; the creator becomes owner with an ADMIN row
    #[instrument(skip(self, request))]
    pub async fn create_group(
        &self,
        owner_id: Snowflake,
        request: CreateGroupRequest,
    ) -> ServiceResult<GroupResponse> {
        let slug = slugify(&request.name);
        if slug.is_empty() {
            return Err(ServiceError::validation(
                "Group name must contain at least one letter or digit",
            ));
        }
        if self.ctx.group_repo().slug_exists(&slug, None).await? {
            return Err(ServiceError::Domain(DomainError::SlugTaken));
        }

        let owner = self.get_user(owner_id).await?;

        let mut group = Group::new(self.ctx.generate_id(), request.name, owner_id);
        group.description = request.description;
        group.is_private = request.is_private;

        self.ctx.group_repo().create(&group).await?;

        // The owner's membership row is part of group creation
        let member = GroupMember::owner(group.id, owner_id);
        self.ctx.member_repo().create(&member).await?;

        info!(group_id = %group.id, owner_id = %owner_id, "Group created");

        Ok(GroupResponse::from(GroupWithMeta {
            group,
            owner,
            member_count: 1,
            post_count: 0,
            viewer_role: Some(GroupRole::Admin),
        }))
    }

    /// Groups visible to the viewer, with pagination and search
    #[instrument(skip(self, query))]
    pub async fn list_groups(
        &self,
        viewer_id: Snowflake,
        query: GroupListQuery,
    ) -> ServiceResult<PaginatedResponse<GroupResponse>> {
        let page = query.page;
        let (groups, total) = self.ctx.group_repo().list(viewer_id, &query).await?;

        let mut responses = Vec::with_capacity(groups.len());
        for group in groups {
            responses.push(self.build_response(group, viewer_id).await?);
        }

        Ok(PaginatedResponse::new(responses, page.page, page.limit, total))
    }

    /// Get one group; private groups are visible to members only
    #[instrument(skip(self))]
    pub async fn get_group(
        &self,
        group_id: Snowflake,
        viewer_id: Snowflake,
    ) -> ServiceResult<GroupResponse> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        policy
            .require(&group, viewer_id, GroupAction::ViewGroup, "view this group")
            .await?;

        self.build_response(group, viewer_id).await
    }

    /// Update group settings (owner or ADMIN)
    #[instrument(skip(self, request))]
    pub async fn update_group(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
        request: UpdateGroupRequest,
    ) -> ServiceResult<GroupResponse> {
        let policy = PolicyService::new(self.ctx);
        let mut group = policy.get_group(group_id).await?;

        policy
            .require(&group, user_id, GroupAction::UpdateGroup, "update this group")
            .await?;

        let mut changed = false;

        if let Some(name) = request.name {
            if name != group.name {
                let slug = slugify(&name);
                if slug.is_empty() {
                    return Err(ServiceError::validation(
                        "Group name must contain at least one letter or digit",
                    ));
                }
                // Renaming must not collide with another group's slug
                if self.ctx.group_repo().slug_exists(&slug, Some(group.id)).await? {
                    return Err(ServiceError::Domain(DomainError::SlugTaken));
                }
                group.set_name(name);
                changed = true;
            }
        }

        if let Some(description) = request.description {
            group.set_description(Some(description));
            changed = true;
        }

        if let Some(is_private) = request.is_private {
            group.set_private(is_private);
            changed = true;
        }

        if changed {
            self.ctx.group_repo().update(&group).await?;
            info!(group_id = %group.id, user_id = %user_id, "Group updated");
        }

        self.build_response(group, user_id).await
    }

    /// Delete group (strictly owner)
    #[instrument(skip(self))]
    pub async fn delete_group(&self, group_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let policy = PolicyService::new(self.ctx);
        let group = policy.get_group(group_id).await?;

        if !group.is_owner(user_id) {
            return Err(ServiceError::Domain(DomainError::NotGroupOwner));
        }

        self.ctx.group_repo().delete(group_id).await?;

        info!(group_id = %group_id, "Group deleted");

        Ok(())
    }

    /// Assemble the full response for a group as seen by `viewer_id`
    async fn build_response(
        &self,
        group: Group,
        viewer_id: Snowflake,
    ) -> ServiceResult<GroupResponse> {
        let owner = self.get_user(group.owner_id).await?;
        let member_count = self.ctx.group_repo().member_count(group.id).await?;
        let post_count = self.ctx.group_repo().post_count(group.id).await?;
        let viewer_role = self
            .ctx
            .member_repo()
            .find(group.id, viewer_id)
            .await?
            .map(|m| m.role);

        Ok(GroupResponse::from(GroupWithMeta {
            group,
            owner,
            member_count,
            post_count,
            viewer_role,
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

#[cfg(test)]
mod tests {
    // Covered end-to-end by the integration test suite
}
