//! Comment entity - threaded one level under a post

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment on a post
///
/// `parent_id` references another comment on the same post; threading is a
/// single level deep (replies to replies attach to the top-level comment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub parent_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a top-level comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            post_id,
            author_id,
            content,
            parent_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a reply to an existing comment
    pub fn reply(
        id: Snowflake,
        post_id: Snowflake,
        author_id: Snowflake,
        content: String,
        parent_id: Snowflake,
    ) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(id, post_id, author_id, content)
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_comment() {
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "Nice".to_string(),
        );
        assert!(!comment.is_reply());
    }

    #[test]
    fn test_reply() {
        let reply = Comment::reply(
            Snowflake::new(4),
            Snowflake::new(2),
            Snowflake::new(3),
            "Agreed".to_string(),
            Snowflake::new(1),
        );
        assert!(reply.is_reply());
        assert_eq!(reply.parent_id, Some(Snowflake::new(1)));
    }
}
