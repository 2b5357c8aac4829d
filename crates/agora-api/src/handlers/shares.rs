//! Post sharing handlers

use axum::{
    extract::{Path, State},
    Json,
};
use agora_service::{SharedPostResponse, SharePostRequest, ShareResponse, ShareService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_path_id;

/// Share a post with another user
///
/// POST /posts/share
pub async fn share_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SharePostRequest>,
) -> ApiResult<Created<Json<ShareResponse>>> {
    let service = ShareService::new(state.service_context());
    let response = service.share_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Fetch a shared post record (sharer or receiver only)
///
/// GET /posts/shared/{shared_post_id}
pub async fn get_shared_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shared_post_id): Path<String>,
) -> ApiResult<Json<SharedPostResponse>> {
    let shared_post_id = parse_path_id(&shared_post_id, "shared_post_id")?;

    let service = ShareService::new(state.service_context());
    let response = service.get_shared_post(shared_post_id, auth.user_id).await?;
    Ok(Json(response))
}
