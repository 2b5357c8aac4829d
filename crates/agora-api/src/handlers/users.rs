//! User handlers

use axum::{
    extract::{Path, State},
    Json,
};
use agora_service::{CurrentUserResponse, UserResponse, UserService};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

use super::parse_path_id;

/// Get the authenticated user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Get a user's public profile
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = parse_path_id(&user_id, "user_id")?;

    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}
