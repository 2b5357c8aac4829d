//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use agora_core::entities::JoinRequestStatus;
use agora_core::value_objects::GroupRole;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with page/limit pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, limit: i64, total_count: i64) -> Self {
        Self {
            data,
            pagination: PageMeta {
                page,
                limit,
                total_count,
                total_pages: if limit > 0 {
                    (total_count + limit - 1) / limit
                } else {
                    0
                },
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

/// Plain informational response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
}

impl StatusResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (limited fields)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// User response carrying the email (member rosters, join requests)
#[derive(Debug, Clone, Serialize)]
pub struct MemberUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Current authenticated user response
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Group Responses
// ============================================================================

/// Group response with counts and the viewer's membership
#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_private: bool,
    pub owner: UserResponse,
    pub member_count: i64,
    pub post_count: i64,
    pub is_member: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<GroupRole>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

/// Group member response
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub group_id: String,
    pub user: MemberUserResponse,
    pub role: GroupRole,
    pub joined_at: DateTime<Utc>,
}

/// Join request response
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequestResponse {
    pub group_id: String,
    pub user: MemberUserResponse,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post response with counts
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub published: bool,
    pub comment_count: i64,
    pub reaction_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment response with one level of replies
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: UserResponse,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CommentResponse>,
}

/// Reaction response
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub post_id: String,
    pub user: UserResponse,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// Message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender: UserResponse,
    pub receiver: UserResponse,
    pub content: String,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_post_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Conversation summary derived from the caller's messages
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: i64,
}

/// Mark-read outcome
#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}

// ============================================================================
// Share Responses
// ============================================================================

/// The shared post's payload (post snapshot with author)
#[derive(Debug, Clone, Serialize)]
pub struct SharedPostPreview {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: UserResponse,
}

/// Shared post response
#[derive(Debug, Clone, Serialize)]
pub struct SharedPostResponse {
    pub id: String,
    pub post: SharedPostPreview,
    pub sharer: UserResponse,
    pub receiver_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Share outcome: the record plus the message that carries it
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub shared_post: SharedPostResponse,
    pub message: MessageResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness response with dependency checks
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta() {
        let response = PaginatedResponse::new(vec![1, 2, 3], 1, 10, 23);
        assert_eq!(response.pagination.total_pages, 3);

        let response = PaginatedResponse::new(Vec::<i32>::new(), 1, 10, 0);
        assert_eq!(response.pagination.total_pages, 0);

        let response = PaginatedResponse::new(vec![1], 2, 10, 20);
        assert_eq!(response.pagination.total_pages, 2);
    }

    #[test]
    fn test_health_responses() {
        assert_eq!(HealthResponse::healthy().status, "ok");
        assert_eq!(ReadinessResponse::ready(true).status, "ready");
        assert_eq!(ReadinessResponse::ready(false).status, "degraded");
    }
}
