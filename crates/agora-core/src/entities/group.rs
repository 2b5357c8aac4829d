//! Group entity - a named community

use chrono::{DateTime, Utc};

use crate::value_objects::{slugify, Snowflake};

/// Group (community) entity
///
/// Invariants: the slug is derived from the name and unique across groups;
/// the owner always holds an ADMIN membership row created with the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Snowflake,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_private: bool,
    pub owner_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a new Group; the slug is derived from the name
    pub fn new(id: Snowflake, name: String, owner_id: Snowflake) -> Self {
        let now = Utc::now();
        let slug = slugify(&name);
        Self {
            id,
            name,
            slug,
            description: None,
            is_private: false,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the group owner
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Rename the group, re-deriving the slug
    pub fn set_name(&mut self, name: String) {
        self.slug = slugify(&name);
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the description
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    /// Toggle privacy
    pub fn set_private(&mut self, is_private: bool) {
        self.is_private = is_private;
        self.updated_at = Utc::now();
    }
}
