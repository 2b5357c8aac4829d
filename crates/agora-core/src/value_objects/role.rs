//! Membership roles and the group capability policy
//!
//! Every group-scoped authorization decision in the application goes
//! through [`Actor::allows`]. Services load the group and the caller's
//! membership row, build an [`Actor`], and ask it about a [`GroupAction`];
//! no handler re-implements role checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership role within a group
///
/// Ordered by authority: `Member < Moderator < Admin`. The group owner sits
/// above all roles and is represented on [`Actor`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupRole {
    Member,
    Moderator,
    Admin,
}

impl GroupRole {
    /// Database/API representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Member => "MEMBER",
        }
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GroupRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "MODERATOR" => Ok(Self::Moderator),
            "MEMBER" => Ok(Self::Member),
            _ => Err(RoleParseError),
        }
    }
}

/// Error when parsing a role from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown role")]
pub struct RoleParseError;

/// Actions governed by the group policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAction {
    /// Read the group itself
    ViewGroup,
    /// List the member roster
    ViewMembers,
    /// List/read posts in the group
    ViewPosts,
    /// Create a post in the group
    CreatePost,
    /// Add a member with a non-admin role
    AddMember,
    /// Grant the ADMIN role (on add or on role change)
    GrantAdmin,
    /// Change an existing member's role
    UpdateRole,
    /// Remove a member holding `target` role
    RemoveMember { target: GroupRole },
    /// List and decide pending join requests
    ReviewJoinRequests,
    /// Edit group name/description/privacy
    UpdateGroup,
    /// Delete the group
    DeleteGroup,
    /// Edit or delete other members' posts
    ModerateContent,
}

/// The caller, as seen by the policy
///
/// `role` is `None` for authenticated users with no membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub is_owner: bool,
    pub role: Option<GroupRole>,
}

impl Actor {
    pub fn owner() -> Self {
        Self {
            is_owner: true,
            role: Some(GroupRole::Admin),
        }
    }

    pub fn with_role(role: GroupRole) -> Self {
        Self {
            is_owner: false,
            role: Some(role),
        }
    }

    pub fn non_member() -> Self {
        Self {
            is_owner: false,
            role: None,
        }
    }

    /// Decide whether this actor may perform `action` in a group with the
    /// given privacy. Pure function of its inputs; the single source of
    /// truth for the role decision table.
    ///
    /// Owner exceptions that depend on the *target* (the owner's own row
    /// can never be removed or demoted) are enforced by the services,
    /// since they need the target's identity, not just its role.
    pub fn allows(&self, is_private: bool, action: GroupAction) -> bool {
        if self.is_owner {
            return true;
        }

        use GroupAction::*;
        match action {
            ViewGroup | ViewMembers | ViewPosts => !is_private || self.role.is_some(),
            CreatePost => self.role.is_some(),
            AddMember | ReviewJoinRequests | ModerateContent => {
                self.role >= Some(GroupRole::Moderator)
            }
            RemoveMember { target } => match target {
                GroupRole::Member => self.role >= Some(GroupRole::Moderator),
                GroupRole::Moderator => self.role == Some(GroupRole::Admin),
                // Removing an admin is the owner's call
                GroupRole::Admin => false,
            },
            UpdateGroup => self.role == Some(GroupRole::Admin),
            // Role grants and revocations, and group deletion, are owner-only
            GrantAdmin | UpdateRole | DeleteGroup => false,
        }
    }
}
