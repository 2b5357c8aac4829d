//! Message entity - a direct message between two users

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Direct message
///
/// There is no thread entity; conversations are derived at read time by
/// grouping messages by the counterpart user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub content: String,
    pub read: bool,
    pub shared_post_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread Message
    pub fn new(id: Snowflake, sender_id: Snowflake, receiver_id: Snowflake, content: String) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            content,
            read: false,
            shared_post_id: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a shared-post reference
    pub fn with_shared_post(mut self, shared_post_id: Snowflake) -> Self {
        self.shared_post_id = Some(shared_post_id);
        self
    }

    /// The other participant from `user_id`'s point of view
    #[inline]
    pub fn counterpart(&self, user_id: Snowflake) -> Snowflake {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }

    /// Whether this message is unread from the receiver's side
    #[inline]
    pub fn is_unread_for(&self, user_id: Snowflake) -> bool {
        self.receiver_id == user_id && !self.read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            "hey".to_string(),
        );
        assert!(!msg.read);
        assert!(msg.shared_post_id.is_none());
    }

    #[test]
    fn test_counterpart() {
        let msg = Message::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            "hey".to_string(),
        );
        assert_eq!(msg.counterpart(Snowflake::new(10)), Snowflake::new(20));
        assert_eq!(msg.counterpart(Snowflake::new(20)), Snowflake::new(10));
    }

    #[test]
    fn test_unread_direction() {
        let msg = Message::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            "hey".to_string(),
        );
        assert!(msg.is_unread_for(Snowflake::new(20)));
        assert!(!msg.is_unread_for(Snowflake::new(10)));
    }
}
