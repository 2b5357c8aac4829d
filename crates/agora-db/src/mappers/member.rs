//! GroupMember entity <-> model mapper
//!
//! Role columns are TEXT; a row with an unknown role is treated as
//! corrupt data and surfaces as a database error rather than silently
//! downgrading the member.

use agora_core::entities::{GroupMember, User};
use agora_core::error::DomainError;
use agora_core::value_objects::{GroupRole, Snowflake};

use crate::models::{GroupMemberModel, MemberWithUserModel};

/// Convert a member row, validating the role column
pub fn member_from_model(model: GroupMemberModel) -> Result<GroupMember, DomainError> {
    Ok(GroupMember {
        group_id: Snowflake::new(model.group_id),
        user_id: Snowflake::new(model.user_id),
        role: parse_role(&model.role)?,
        joined_at: model.joined_at,
        updated_at: model.updated_at,
    })
}

/// Convert a joined member+user row into its entity pair
pub fn member_with_user(model: MemberWithUserModel) -> Result<(GroupMember, User), DomainError> {
    let member = GroupMember {
        group_id: Snowflake::new(model.group_id),
        user_id: Snowflake::new(model.user_id),
        role: parse_role(&model.role)?,
        joined_at: model.joined_at,
        updated_at: model.updated_at,
    };
    let user = User {
        id: Snowflake::new(model.user_id),
        name: model.name,
        email: model.email,
        image: model.image,
        email_verified: model.email_verified,
        created_at: model.user_created_at,
        updated_at: model.user_updated_at,
    };
    Ok((member, user))
}

fn parse_role(raw: &str) -> Result<GroupRole, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::DatabaseError(format!("invalid role column: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_member_from_model() {
        let now = Utc::now();
        let model = GroupMemberModel {
            group_id: 1,
            user_id: 2,
            role: "MODERATOR".to_string(),
            joined_at: now,
            updated_at: now,
        };

        let member = member_from_model(model).unwrap();
        assert_eq!(member.role, GroupRole::Moderator);
    }

    #[test]
    fn test_invalid_role_is_rejected() {
        let now = Utc::now();
        let model = GroupMemberModel {
            group_id: 1,
            user_id: 2,
            role: "SUPERUSER".to_string(),
            joined_at: now,
            updated_at: now,
        };

        assert!(member_from_model(model).is_err());
    }
}
