//! Member entity - a user's membership in a group

use chrono::{DateTime, Utc};

use crate::value_objects::{GroupRole, Snowflake};

/// Group membership row (junction between User and Group)
///
/// Identified by the (group_id, user_id) pair; the storage layer enforces
/// at most one row per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub group_id: Snowflake,
    pub user_id: Snowflake,
    pub role: GroupRole,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupMember {
    /// Create a membership with the given role
    pub fn new(group_id: Snowflake, user_id: Snowflake, role: GroupRole) -> Self {
        let now = Utc::now();
        Self {
            group_id,
            user_id,
            role,
            joined_at: now,
            updated_at: now,
        }
    }

    /// Create a plain MEMBER row (the public-join path)
    pub fn member(group_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(group_id, user_id, GroupRole::Member)
    }

    /// Create the owner's ADMIN row (the group-creation path)
    pub fn owner(group_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(group_id, user_id, GroupRole::Admin)
    }

    /// Change the member's role
    pub fn set_role(&mut self, role: GroupRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}
