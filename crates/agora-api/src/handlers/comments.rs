//! Comment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use agora_service::{CommentResponse, CommentService, CreateCommentRequest};

use crate::extractors::{AuthUser, Page, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_path_id;

/// List a post's comments (threaded one level)
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    page: Page,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let post_id = parse_path_id(&post_id, "post_id")?;

    let service = CommentService::new(state.service_context());
    let response = service
        .list_comments(post_id, auth.user_id, page.query())
        .await?;
    Ok(Json(response))
}

/// Comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = parse_path_id(&post_id, "post_id")?;

    let service = CommentService::new(state.service_context());
    let response = service.create_comment(post_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}
