//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table (password hash queried separately)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
