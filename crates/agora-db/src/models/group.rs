//! Group database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_private: bool,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
