//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying user input
//! also implement `Validate`.

use agora_core::value_objects::GroupRole;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 64, message = "Name must be 2-64 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (the token pair being abandoned, if the client sends it)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Password reset initiation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Email verification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

// ============================================================================
// Group Requests
// ============================================================================

/// Create group request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Group name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_private: bool,
}

/// Update group request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Group name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub is_private: Option<bool>,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Add member request (Snowflake IDs travel as strings)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMemberRequest {
    pub user_id: String,

    #[serde(default = "default_member_role")]
    pub role: GroupRole,
}

fn default_member_role() -> GroupRole {
    GroupRole::Member
}

/// Update member role request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: GroupRole,
}

// ============================================================================
// Join Requests
// ============================================================================

/// Decision on a pending join request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinDecision {
    Accept,
    Reject,
}

/// Review a pending join request
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewJoinRequest {
    pub action: JoinDecision,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    /// Group to post into (Snowflake as string)
    pub group_id: Option<String>,
}

/// Update post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: Option<String>,

    pub published: Option<bool>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,

    /// Parent comment for replies (Snowflake as string)
    pub parent_id: Option<String>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Add reaction request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddReactionRequest {
    #[validate(length(min = 1, max = 32, message = "Reaction type must be 1-32 characters"))]
    pub kind: String,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub receiver_id: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,
}

/// Mark messages from a sender as read
#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadRequest {
    pub sender_id: String,
}

/// Share a post into a direct message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SharePostRequest {
    pub post_id: String,
    pub receiver_id: String,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "securepassword123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_name = RegisterRequest {
            name: "a".to_string(),
            email: "ada@example.com".to_string(),
            password: "securepassword123".to_string(),
        };
        assert!(short_name.validate().is_err());

        let bad_email = RegisterRequest {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            password: "securepassword123".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_create_group_validation() {
        let valid = CreateGroupRequest {
            name: "Rocket Fans".to_string(),
            description: Some("All things rockets".to_string()),
            is_private: false,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateGroupRequest {
            name: String::new(),
            description: None,
            is_private: false,
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_add_member_default_role() {
        let request: AddMemberRequest = serde_json::from_str(r#"{"user_id": "123"}"#).unwrap();
        assert_eq!(request.role, GroupRole::Member);

        let request: AddMemberRequest =
            serde_json::from_str(r#"{"user_id": "123", "role": "MODERATOR"}"#).unwrap();
        assert_eq!(request.role, GroupRole::Moderator);
    }

    #[test]
    fn test_join_decision_parsing() {
        let review: ReviewJoinRequest = serde_json::from_str(r#"{"action": "accept"}"#).unwrap();
        assert_eq!(review.action, JoinDecision::Accept);

        assert!(serde_json::from_str::<ReviewJoinRequest>(r#"{"action": "maybe"}"#).is_err());
    }

    #[test]
    fn test_create_post_validation() {
        let too_long = CreatePostRequest {
            title: "t".repeat(201),
            content: "body".to_string(),
            group_id: None,
        };
        assert!(too_long.validate().is_err());

        let empty_content = CreatePostRequest {
            title: "Title".to_string(),
            content: String::new(),
            group_id: None,
        };
        assert!(empty_content.validate().is_err());
    }
}
