//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub read: bool,
    pub shared_post_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
