//! Authentication handlers

use axum::{extract::State, Json};
use agora_service::{
    AuthResponse, AuthService, ForgotPasswordRequest, LoginRequest, LogoutRequest,
    RefreshTokenRequest, RegisterRequest, StatusResponse, VerifyEmailRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// Logout
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Option<Json<LogoutRequest>>,
) -> ApiResult<NoContent> {
    let _ = request;
    let service = AuthService::new(state.service_context());
    service.logout(auth.user_id).await?;
    Ok(NoContent)
}

/// Initiate a password reset
///
/// POST /auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.forgot_password(request).await?;
    Ok(Json(response))
}

/// Verify an email address
///
/// POST /auth/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyEmailRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.verify_email(request).await?;
    Ok(Json(response))
}
