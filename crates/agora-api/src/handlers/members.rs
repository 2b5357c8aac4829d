//! Member handlers
//!
//! Endpoints for the group roster.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use agora_core::traits::MemberListQuery;
use agora_core::value_objects::GroupRole;
use agora_service::{
    AddMemberRequest, MemberResponse, MemberService, PaginatedResponse, UpdateMemberRoleRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, Page, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_path_id;

/// Filters for the member roster
#[derive(Debug, Deserialize)]
pub struct MemberListParams {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// List group members
///
/// GET /groups/{group_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
    page: Page,
    Query(params): Query<MemberListParams>,
) -> ApiResult<Json<PaginatedResponse<MemberResponse>>> {
    let group_id = parse_path_id(&group_id, "group_id")?;

    let role = params
        .role
        .as_deref()
        .map(|raw| {
            raw.parse::<GroupRole>()
                .map_err(|_| ApiError::invalid_query("Invalid role filter"))
        })
        .transpose()?;

    let query = MemberListQuery {
        role,
        search: params.search.filter(|s| !s.is_empty()),
        page: page.query(),
    };

    let service = MemberService::new(state.service_context());
    let response = service.list_members(group_id, auth.user_id, query).await?;
    Ok(Json(response))
}

/// Add a member
///
/// POST /groups/{group_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddMemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let group_id = parse_path_id(&group_id, "group_id")?;

    let service = MemberService::new(state.service_context());
    let response = service.add_member(group_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Change a member's role
///
/// PUT /groups/{group_id}/members/{user_id}
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((group_id, user_id)): Path<(String, String)>,
    Json(request): Json<UpdateMemberRoleRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let group_id = parse_path_id(&group_id, "group_id")?;
    let user_id = parse_path_id(&user_id, "user_id")?;

    let service = MemberService::new(state.service_context());
    let response = service
        .update_role(group_id, auth.user_id, user_id, request)
        .await?;
    Ok(Json(response))
}

/// Remove a member (or leave the group)
///
/// DELETE /groups/{group_id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((group_id, user_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let group_id = parse_path_id(&group_id, "group_id")?;
    let user_id = parse_path_id(&user_id, "user_id")?;

    let service = MemberService::new(state.service_context());
    service.remove_member(group_id, auth.user_id, user_id).await?;
    Ok(NoContent)
}
