//! Post handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use agora_core::traits::PostListQuery;
use agora_service::{
    CreatePostRequest, PaginatedResponse, PostResponse, PostService, UpdatePostRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, Page, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_path_id;

/// Filters for the post listing
#[derive(Debug, Deserialize)]
pub struct PostListParams {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
}

/// List published posts
///
/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    page: Page,
    Query(params): Query<PostListParams>,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let group_id = params
        .group_id
        .as_deref()
        .map(|raw| parse_path_id(raw, "group_id"))
        .transpose()?;
    let author_id = params
        .author_id
        .as_deref()
        .map(|raw| parse_path_id(raw, "author_id"))
        .transpose()?;

    let query = PostListQuery {
        group_id,
        author_id,
        page: page.query(),
    };

    let service = PostService::new(state.service_context());
    let response = service.list_posts(auth.user_id, query).await?;
    Ok(Json(response))
}

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List a group's posts
///
/// GET /groups/{group_id}/posts
pub async fn list_group_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
    page: Page,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let group_id = parse_path_id(&group_id, "group_id")?;

    let query = PostListQuery {
        group_id: Some(group_id),
        author_id: None,
        page: page.query(),
    };

    let service = PostService::new(state.service_context());
    let response = service.list_posts(auth.user_id, query).await?;
    Ok(Json(response))
}

/// Create a post inside a group
///
/// POST /groups/{group_id}/posts
pub async fn create_group_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
    ValidatedJson(mut request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    // The path wins over any group_id in the body
    parse_path_id(&group_id, "group_id")?;
    request.group_id = Some(group_id);

    let service = PostService::new(state.service_context());
    let response = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get a post
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = parse_path_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    let response = service.get_post(post_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update a post
///
/// PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = parse_path_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    let response = service.update_post(post_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete a post
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<NoContent> {
    let post_id = parse_path_id(&post_id, "post_id")?;

    let service = PostService::new(state.service_context());
    service.delete_post(post_id, auth.user_id).await?;
    Ok(NoContent)
}
