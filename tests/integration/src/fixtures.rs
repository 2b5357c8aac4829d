//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test User {suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: CurrentUserResponse,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
}

/// Public user response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

/// Create group request
#[derive(Debug, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
}

impl CreateGroupRequest {
    pub fn public() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Group {suffix}"),
            description: Some("A test group".to_string()),
            is_private: false,
        }
    }

    pub fn private() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Private Group {suffix}"),
            description: None,
            is_private: true,
        }
    }
}

/// Group response
#[derive(Debug, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub is_private: bool,
    pub owner: UserResponse,
    pub member_count: i64,
    pub post_count: i64,
    pub is_member: bool,
    pub role: Option<String>,
}

/// Paginated wrapper
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

/// Member response
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub group_id: String,
    pub user: MemberUserResponse,
    pub role: String,
}

/// Member user response (includes email)
#[derive(Debug, Deserialize)]
pub struct MemberUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Join request response
#[derive(Debug, Deserialize)]
pub struct JoinRequestResponse {
    pub group_id: String,
    pub user: MemberUserResponse,
    pub status: String,
}

/// Add member request
#[derive(Debug, Serialize)]
pub struct AddMemberRequest {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl CreatePostRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Post {suffix}"),
            content: "Some content worth reading.".to_string(),
            group_id: None,
        }
    }
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: UserResponse,
    pub group_id: Option<String>,
    pub published: bool,
    pub comment_count: i64,
    pub reaction_count: i64,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub parent_id: Option<String>,
    #[serde(default)]
    pub replies: Vec<CommentResponse>,
}

/// Reaction response
#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub post_id: String,
    pub user: UserResponse,
    pub kind: String,
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender: UserResponse,
    pub receiver: UserResponse,
    pub content: String,
    pub read: bool,
    pub shared_post_id: Option<String>,
}

/// Conversation response
#[derive(Debug, Deserialize)]
pub struct ConversationResponse {
    pub user_id: String,
    pub name: String,
    pub last_message: String,
    pub unread_count: i64,
}

/// Share response
#[derive(Debug, Deserialize)]
pub struct ShareResponse {
    pub shared_post: SharedPostResponse,
    pub message: MessageResponse,
}

/// Shared post response
#[derive(Debug, Deserialize)]
pub struct SharedPostResponse {
    pub id: String,
    pub sharer: UserResponse,
    pub receiver_id: String,
    pub message: Option<String>,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
