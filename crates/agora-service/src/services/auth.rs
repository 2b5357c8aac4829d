//! Authentication service
//!
//! Registration, login, token refresh, logout, password reset, and email
//! verification.

use agora_common::auth::{hash_password, validate_password_strength, verify_password};
use agora_core::entities::{generate_token, User};
use agora_core::value_objects::Snowflake;
use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AuthResponse, CurrentUserResponse, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest, StatusResponse, VerifyEmailRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Always returned by forgot-password so the endpoint does not reveal
/// whether an email is registered.
const RESET_NEUTRAL_MESSAGE: &str =
    "If your email is registered, you will receive a password reset link";

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user = User::new(self.ctx.generate_id(), request.name, request.email);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        // Verification token; delivery is not wired up yet.
        // TODO: send the verification email once an email provider exists
        let token = generate_token();
        self.ctx
            .auth_token_repo()
            .create_email_verification(user.id, &token, Utc::now() + Duration::hours(24))
            .await?;

        info!(user_id = %user.id, "User registered");

        self.issue_tokens(&user)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(agora_common::AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(agora_common::AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(agora_common::AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_tokens(&user)
    }

    /// Refresh the token pair using a refresh token
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
            .map_err(ServiceError::from)?;

        let user_id = claims.user_id().map_err(ServiceError::from)?;

        // The account must still exist
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let pair = self
            .ctx
            .jwt_service()
            .refresh_tokens(&request.refresh_token)
            .map_err(ServiceError::from)?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Logout
    ///
    /// Tokens are stateless, so there is nothing to revoke server-side;
    /// the endpoint exists for client symmetry and future revocation.
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Snowflake) -> ServiceResult<()> {
        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Initiate a password reset
    ///
    /// The response never reveals whether the email exists.
    #[instrument(skip(self, request))]
    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> ServiceResult<StatusResponse> {
        if let Some(user) = self.ctx.user_repo().find_by_email(&request.email).await? {
            let token = generate_token();
            self.ctx
                .auth_token_repo()
                .upsert_password_reset(user.id, &user.email, &token, Utc::now() + Duration::hours(1))
                .await?;

            info!(user_id = %user.id, "Password reset token issued");
            // TODO: send the reset email once an email provider exists
        }

        Ok(StatusResponse::new(RESET_NEUTRAL_MESSAGE))
    }

    /// Consume an email-verification token
    #[instrument(skip(self, request))]
    pub async fn verify_email(&self, request: VerifyEmailRequest) -> ServiceResult<StatusResponse> {
        let user_id = self
            .ctx
            .auth_token_repo()
            .consume_email_verification(&request.token)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid or expired token"))?;

        self.ctx.user_repo().mark_email_verified(user_id).await?;

        info!(user_id = %user_id, "Email verified");

        Ok(StatusResponse::new("Email verified successfully"))
    }

    fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let session_id = Uuid::new_v4().to_string();
        let pair = self
            .ctx
            .jwt_service()
            .generate_token_pair_with_session(user.id, Some(session_id))
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}
