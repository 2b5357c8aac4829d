//! Join request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the join_requests table
#[derive(Debug, Clone, FromRow)]
pub struct JoinRequestModel {
    pub group_id: i64,
    pub user_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decided_by: Option<i64>,
}

/// Join request joined with the requesting user (for review listings)
#[derive(Debug, Clone, FromRow)]
pub struct JoinRequestWithUserModel {
    pub group_id: i64,
    pub user_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decided_by: Option<i64>,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub email_verified: bool,
    pub user_created_at: DateTime<Utc>,
    pub user_updated_at: DateTime<Utc>,
}
