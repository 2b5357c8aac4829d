//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Group not found: {0}")]
    GroupNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Shared post not found: {0}")]
    SharedPostNotFound(Snowflake),

    #[error("Member not found in group")]
    MemberNotFound,

    #[error("Join request not found")]
    JoinRequestNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("A group with this name already exists")]
    SlugTaken,

    #[error("Parent comment not found or does not belong to this post")]
    InvalidParentComment,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("You do not have permission to {0}")]
    AccessDenied(&'static str),

    #[error("Only the group owner may do this")]
    NotGroupOwner,

    #[error("Cannot remove the group owner")]
    CannotRemoveOwner,

    #[error("The group owner's role cannot be changed")]
    CannotDemoteOwner,

    #[error("Not the post author")]
    NotPostAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Already a member of this group")]
    AlreadyMember,

    #[error("A join request is already pending")]
    AlreadyRequested,

    #[error("You have already reacted with this type")]
    AlreadyReacted,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::SharedPostNotFound(_) => "UNKNOWN_SHARED_POST",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::JoinRequestNotFound => "UNKNOWN_JOIN_REQUEST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::SlugTaken => "GROUP_NAME_TAKEN",
            Self::InvalidParentComment => "INVALID_PARENT_COMMENT",

            // Authorization
            Self::AccessDenied(_) => "ACCESS_DENIED",
            Self::NotGroupOwner => "NOT_GROUP_OWNER",
            Self::CannotRemoveOwner => "CANNOT_REMOVE_OWNER",
            Self::CannotDemoteOwner => "CANNOT_DEMOTE_OWNER",
            Self::NotPostAuthor => "NOT_POST_AUTHOR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyRequested => "ALREADY_REQUESTED",
            Self::AlreadyReacted => "ALREADY_REACTED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::GroupNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::SharedPostNotFound(_)
                | Self::MemberNotFound
                | Self::JoinRequestNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::SlugTaken | Self::InvalidParentComment
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied(_)
                | Self::NotGroupOwner
                | Self::CannotRemoveOwner
                | Self::CannotDemoteOwner
                | Self::NotPostAuthor
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::AlreadyMember | Self::AlreadyRequested | Self::AlreadyReacted
        )
    }
}
