//! Reaction entity - a typed reaction on a post

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Reaction on a post
///
/// Identified by (post_id, user_id, kind); the storage layer's composite
/// key makes a second identical reaction a conflict, not a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(post_id: Snowflake, user_id: Snowflake, kind: String) -> Self {
        Self {
            post_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}
