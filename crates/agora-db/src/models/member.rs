//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the group_members table
#[derive(Debug, Clone, FromRow)]
pub struct GroupMemberModel {
    pub group_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Member row joined with its user profile (for roster listings)
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserModel {
    pub group_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub email_verified: bool,
    pub user_created_at: DateTime<Utc>,
    pub user_updated_at: DateTime<Utc>,
}
