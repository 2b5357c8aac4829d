//! Group handlers
//!
//! Endpoints for group management.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use agora_core::traits::GroupListQuery;
use agora_service::{
    CreateGroupRequest, GroupResponse, GroupService, PaginatedResponse, UpdateGroupRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, Page, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_path_id;

/// Filters for the group listing
#[derive(Debug, Deserialize)]
pub struct GroupListParams {
    #[serde(default)]
    pub search: Option<String>,
    /// Only groups the caller belongs to
    #[serde(default)]
    pub my_groups: bool,
}

/// List groups visible to the caller
///
/// GET /groups
pub async fn list_groups(
    State(state): State<AppState>,
    auth: AuthUser,
    page: Page,
    Query(params): Query<GroupListParams>,
) -> ApiResult<Json<PaginatedResponse<GroupResponse>>> {
    let query = GroupListQuery {
        search: params.search.filter(|s| !s.is_empty()),
        only_member: params.my_groups,
        page: page.query(),
    };

    let service = GroupService::new(state.service_context());
    let response = service.list_groups(auth.user_id, query).await?;
    Ok(Json(response))
}

/// Create a new group
///
/// POST /groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGroupRequest>,
) -> ApiResult<Created<Json<GroupResponse>>> {
    let service = GroupService::new(state.service_context());
    let response = service.create_group(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get group by ID
///
/// GET /groups/{group_id}
pub async fn get_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
) -> ApiResult<Json<GroupResponse>> {
    let group_id = parse_path_id(&group_id, "group_id")?;

    let service = GroupService::new(state.service_context());
    let response = service.get_group(group_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update group settings
///
/// PATCH /groups/{group_id}
pub async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateGroupRequest>,
) -> ApiResult<Json<GroupResponse>> {
    let group_id = parse_path_id(&group_id, "group_id")?;

    let service = GroupService::new(state.service_context());
    let response = service.update_group(group_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete group
///
/// DELETE /groups/{group_id}
pub async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
) -> ApiResult<NoContent> {
    let group_id = parse_path_id(&group_id, "group_id")?;

    let service = GroupService::new(state.service_context());
    service.delete_group(group_id, auth.user_id).await?;
    Ok(NoContent)
}
