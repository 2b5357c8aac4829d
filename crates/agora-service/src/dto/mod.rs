//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AddMemberRequest, AddReactionRequest, CreateCommentRequest, CreateGroupRequest,
    CreatePostRequest, ForgotPasswordRequest, JoinDecision, LoginRequest, LogoutRequest,
    MarkReadRequest, RefreshTokenRequest, RegisterRequest, ReviewJoinRequest, SendMessageRequest,
    SharePostRequest, UpdateGroupRequest, UpdateMemberRoleRequest, UpdatePostRequest,
    VerifyEmailRequest,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, CommentResponse, ConversationResponse, CurrentUserResponse, GroupResponse,
    HealthResponse, JoinRequestResponse, MarkReadResponse, MemberResponse, MemberUserResponse,
    MessageResponse, PageMeta, PaginatedResponse, PostResponse, ReactionResponse,
    ReadinessResponse, SharedPostPreview, SharedPostResponse, ShareResponse, StatusResponse,
    UserResponse,
};

// Re-export mappers and helper structs
pub use mappers::{GroupWithMeta, MemberWithUser, PostWithMeta};
