//! SharedPost entity - a post forwarded into a direct message

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Record of one user sharing a post with another
///
/// Readable only by the sharer and the receiver. The accompanying Message
/// row references this record through its `shared_post_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedPost {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub sharer_id: Snowflake,
    pub receiver_id: Snowflake,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SharedPost {
    /// Create a new SharedPost
    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        sharer_id: Snowflake,
        receiver_id: Snowflake,
        message: Option<String>,
    ) -> Self {
        Self {
            id,
            post_id,
            sharer_id,
            receiver_id,
            message,
            created_at: Utc::now(),
        }
    }

    /// Check if a user participates in this share
    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.sharer_id == user_id || self.receiver_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involves() {
        let shared = SharedPost::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(10),
            Snowflake::new(20),
            None,
        );
        assert!(shared.involves(Snowflake::new(10)));
        assert!(shared.involves(Snowflake::new(20)));
        assert!(!shared.involves(Snowflake::new(30)));
    }
}
