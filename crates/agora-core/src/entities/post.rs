//! Post entity - authored content, optionally scoped to a group

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Post entity
///
/// A post with `group_id` set lives inside that group and inherits its
/// visibility rules; unpublished posts are hidden from all listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub title: String,
    pub content: String,
    pub author_id: Snowflake,
    pub group_id: Option<Snowflake>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new published Post
    pub fn new(
        id: Snowflake,
        title: String,
        content: String,
        author_id: Snowflake,
        group_id: Option<Snowflake>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            content,
            author_id,
            group_id,
            published: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user authored this post
    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Update the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Update the body
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Publish or unpublish
    pub fn set_published(&mut self, published: bool) {
        self.published = published;
        self.updated_at = Utc::now();
    }
}
