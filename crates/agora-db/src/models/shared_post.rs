//! Shared post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the shared_posts table
#[derive(Debug, Clone, FromRow)]
pub struct SharedPostModel {
    pub id: i64,
    pub post_id: i64,
    pub sharer_id: i64,
    pub receiver_id: i64,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
