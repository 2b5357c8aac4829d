//! User entity - an account identity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User account
///
/// Referenced by every other entity; never hard-deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User
    pub fn new(id: Snowflake, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            image: None,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the profile image
    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
        self.updated_at = Utc::now();
    }

    /// Mark the email address as verified
    pub fn mark_verified(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }
}

/// Generate a random token for password-reset and email-verification links
pub fn generate_token() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            Snowflake::new(1),
            "Ada".to_string(),
            "ada@example.com".to_string(),
        );
        assert_eq!(user.name, "Ada");
        assert!(!user.email_verified);
        assert!(user.image.is_none());
    }

    #[test]
    fn test_mark_verified() {
        let mut user = User::new(
            Snowflake::new(1),
            "Ada".to_string(),
            "ada@example.com".to_string(),
        );
        user.mark_verified();
        assert!(user.email_verified);
    }

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), 48);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_token());
    }
}
