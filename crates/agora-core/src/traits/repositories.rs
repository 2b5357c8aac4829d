//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Comment, Group, GroupMember, JoinRequest, JoinRequestStatus, Message, Post, Reaction,
    SharedPost, User,
};
use crate::error::DomainError;
use crate::value_objects::{GroupRole, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Pagination
// ============================================================================

/// Page/limit pagination used by every listing endpoint
#[derive(Debug, Clone, Copy)]
pub struct PageQuery {
    /// 1-based page number
    pub page: i64,
    /// Page size (already clamped by the caller)
    pub limit: i64,
}

impl PageQuery {
    /// Row offset for the current page
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// Mark the user's email address as verified
    async fn mark_email_verified(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Group Repository
// ============================================================================

/// Filters for the group listing
#[derive(Debug, Clone, Default)]
pub struct GroupListQuery {
    /// Substring match on name/description
    pub search: Option<String>,
    /// Only groups the viewer belongs to
    pub only_member: bool,
    pub page: PageQuery,
}

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find group by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>>;

    /// Check if a slug is taken by a group other than `exclude`
    async fn slug_exists(&self, slug: &str, exclude: Option<Snowflake>) -> RepoResult<bool>;

    /// Groups visible to the viewer (public ones plus their own), with total count
    async fn list(&self, viewer_id: Snowflake, query: &GroupListQuery)
        -> RepoResult<(Vec<Group>, i64)>;

    /// Create a new group
    async fn create(&self, group: &Group) -> RepoResult<()>;

    /// Update an existing group
    async fn update(&self, group: &Group) -> RepoResult<()>;

    /// Delete a group (cascades to members, requests, and group posts)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get member count for a group
    async fn member_count(&self, group_id: Snowflake) -> RepoResult<i64>;

    /// Get published post count for a group
    async fn post_count(&self, group_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Member Repository
// ============================================================================

/// Filters for the member roster listing
#[derive(Debug, Clone, Default)]
pub struct MemberListQuery {
    /// Restrict to a single role
    pub role: Option<GroupRole>,
    /// Substring match on the member's name or email
    pub search: Option<String>,
    pub page: PageQuery,
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by group and user ID
    async fn find(&self, group_id: Snowflake, user_id: Snowflake)
        -> RepoResult<Option<GroupMember>>;

    /// Roster with user profiles and the filtered total count
    async fn find_by_group(
        &self,
        group_id: Snowflake,
        query: &MemberListQuery,
    ) -> RepoResult<(Vec<(GroupMember, User)>, i64)>;

    /// Check if user is a member of group
    async fn is_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Add member to group
    async fn create(&self, member: &GroupMember) -> RepoResult<()>;

    /// Change a member's role
    async fn update_role(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
        role: GroupRole,
    ) -> RepoResult<()>;

    /// Remove member from group
    async fn delete(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Join Request Repository
// ============================================================================

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    /// Find a request by group and user ID
    async fn find(&self, group_id: Snowflake, user_id: Snowflake)
        -> RepoResult<Option<JoinRequest>>;

    /// Pending requests for a group with the requesting users
    async fn find_pending(&self, group_id: Snowflake)
        -> RepoResult<Vec<(JoinRequest, User)>>;

    /// Persist a new request, re-opening a previously decided one for the
    /// same pair; fails with AlreadyRequested when one is still PENDING
    async fn create(&self, request: &JoinRequest) -> RepoResult<()>;

    /// Decide a PENDING request; fails with JoinRequestNotFound when no
    /// pending row exists for the pair
    async fn decide(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
        status: JoinRequestStatus,
        decided_by: Snowflake,
    ) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Filters for post listings (published posts only)
#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    pub group_id: Option<Snowflake>,
    pub author_id: Option<Snowflake>,
    pub page: PageQuery,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Published posts matching the filters, newest first, with total
    /// count. Posts in private groups are included only when the viewer
    /// is a member.
    async fn list(
        &self,
        viewer_id: Snowflake,
        query: &PostListQuery,
    ) -> RepoResult<(Vec<Post>, i64)>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update an existing post
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post (cascades to comments and reactions)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Count comments on a post
    async fn comment_count(&self, post_id: Snowflake) -> RepoResult<i64>;

    /// Count reactions on a post
    async fn reaction_count(&self, post_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Top-level comments for a post, newest first
    async fn find_top_level(&self, post_id: Snowflake, page: &PageQuery)
        -> RepoResult<Vec<Comment>>;

    /// All replies for a post, oldest first
    async fn find_replies(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Reactions on a post, optionally restricted to one kind
    async fn find_by_post(&self, post_id: Snowflake, kind: Option<&str>)
        -> RepoResult<Vec<Reaction>>;

    /// Add a reaction; a duplicate (post, user, kind) is a conflict
    async fn create(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Remove the caller's reaction of the given kind (no-op if absent)
    async fn delete(&self, post_id: Snowflake, user_id: Snowflake, kind: &str) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Create a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Two-party conversation, oldest first
    async fn find_thread(&self, user_a: Snowflake, user_b: Snowflake)
        -> RepoResult<Vec<Message>>;

    /// Every message the user sent or received, newest first
    async fn find_involving(&self, user_id: Snowflake) -> RepoResult<Vec<Message>>;

    /// Mark all unread messages from `sender_id` to `receiver_id` as read;
    /// returns the number of rows updated
    async fn mark_read_from(
        &self,
        sender_id: Snowflake,
        receiver_id: Snowflake,
    ) -> RepoResult<u64>;
}

// ============================================================================
// Shared Post Repository
// ============================================================================

#[async_trait]
pub trait SharedPostRepository: Send + Sync {
    /// Find shared-post record by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SharedPost>>;

    /// Create a new shared-post record
    async fn create(&self, shared: &SharedPost) -> RepoResult<()>;
}

// ============================================================================
// Auth Token Repository
// ============================================================================

#[async_trait]
pub trait AuthTokenRepository: Send + Sync {
    /// Upsert the password-reset token for a user (one active token per user)
    async fn upsert_password_reset(
        &self,
        user_id: Snowflake,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Create an email-verification token
    async fn create_email_verification(
        &self,
        user_id: Snowflake,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Consume an email-verification token, returning the user it belongs
    /// to if the token exists and has not expired. The token is deleted
    /// either way.
    async fn consume_email_verification(&self, token: &str) -> RepoResult<Option<Snowflake>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_offset() {
        let page = PageQuery { page: 1, limit: 20 };
        assert_eq!(page.offset(), 0);

        let page = PageQuery { page: 3, limit: 10 };
        assert_eq!(page.offset(), 20);
    }
}
