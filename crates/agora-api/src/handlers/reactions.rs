//! Reaction handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use agora_service::{AddReactionRequest, ReactionResponse, ReactionService};
use serde::Deserialize;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_path_id;

/// Reaction kind filter / selector
#[derive(Debug, Deserialize)]
pub struct ReactionParams {
    #[serde(default)]
    pub kind: Option<String>,
}

/// List a post's reactions
///
/// GET /posts/{post_id}/reactions
pub async fn list_reactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    Query(params): Query<ReactionParams>,
) -> ApiResult<Json<Vec<ReactionResponse>>> {
    let post_id = parse_path_id(&post_id, "post_id")?;

    let service = ReactionService::new(state.service_context());
    let response = service
        .list_reactions(post_id, auth.user_id, params.kind.as_deref())
        .await?;
    Ok(Json(response))
}

/// React to a post
///
/// POST /posts/{post_id}/reactions
pub async fn add_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddReactionRequest>,
) -> ApiResult<Created<Json<ReactionResponse>>> {
    let post_id = parse_path_id(&post_id, "post_id")?;

    let service = ReactionService::new(state.service_context());
    let response = service.add_reaction(post_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Remove the caller's reaction of a kind
///
/// DELETE /posts/{post_id}/reactions?kind=...
pub async fn remove_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    Query(params): Query<ReactionParams>,
) -> ApiResult<NoContent> {
    let post_id = parse_path_id(&post_id, "post_id")?;
    let kind = params
        .kind
        .ok_or_else(|| ApiError::invalid_query("Missing reaction kind"))?;

    let service = ReactionService::new(state.service_context());
    service.remove_reaction(post_id, auth.user_id, &kind).await?;
    Ok(NoContent)
}
