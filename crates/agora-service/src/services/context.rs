//! Service context - dependency container for services
//!
//! Holds all repositories and shared services the domain services need.

use std::sync::Arc;

use agora_common::auth::JwtService;
use agora_core::traits::{
    AuthTokenRepository, CommentRepository, GroupRepository, JoinRequestRepository,
    MemberRepository, MessageRepository, PostRepository, ReactionRepository,
    SharedPostRepository, UserRepository,
};
use agora_core::SnowflakeGenerator;
use agora_db::PgPool;

/// Service context containing all dependencies
///
/// The single dependency container passed to every service. It provides:
/// - Database repositories
/// - JWT service for authentication
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,

    user_repo: Arc<dyn UserRepository>,
    group_repo: Arc<dyn GroupRepository>,
    member_repo: Arc<dyn MemberRepository>,
    join_request_repo: Arc<dyn JoinRequestRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    message_repo: Arc<dyn MessageRepository>,
    shared_post_repo: Arc<dyn SharedPostRepository>,
    auth_token_repo: Arc<dyn AuthTokenRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the group repository
    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the join request repository
    pub fn join_request_repo(&self) -> &dyn JoinRequestRepository {
        self.join_request_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the shared post repository
    pub fn shared_post_repo(&self) -> &dyn SharedPostRepository {
        self.shared_post_repo.as_ref()
    }

    /// Get the auth token repository
    pub fn auth_token_repo(&self) -> &dyn AuthTokenRepository {
        self.auth_token_repo.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> agora_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    join_request_repo: Option<Arc<dyn JoinRequestRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    shared_post_repo: Option<Arc<dyn SharedPostRepository>>,
    auth_token_repo: Option<Arc<dyn AuthTokenRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn join_request_repo(mut self, repo: Arc<dyn JoinRequestRepository>) -> Self {
        self.join_request_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn shared_post_repo(mut self, repo: Arc<dyn SharedPostRepository>) -> Self {
        self.shared_post_repo = Some(repo);
        self
    }

    pub fn auth_token_repo(mut self, repo: Arc<dyn AuthTokenRepository>) -> Self {
        self.auth_token_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        fn required<T>(value: Option<T>, name: &str) -> Result<T, ServiceError> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            user_repo: required(self.user_repo, "user_repo")?,
            group_repo: required(self.group_repo, "group_repo")?,
            member_repo: required(self.member_repo, "member_repo")?,
            join_request_repo: required(self.join_request_repo, "join_request_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            message_repo: required(self.message_repo, "message_repo")?,
            shared_post_repo: required(self.shared_post_repo, "shared_post_repo")?,
            auth_token_repo: required(self.auth_token_repo, "auth_token_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
        })
    }
}
