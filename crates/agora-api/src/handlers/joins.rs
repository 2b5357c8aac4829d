//! Join workflow handlers
//!
//! Joining a group and reviewing private-group join requests.

use axum::{
    extract::{Path, State},
    Json,
};
use agora_service::{
    JoinOutcome, JoinRequestResponse, JoinService, MemberResponse, ReviewJoinRequest,
    StatusResponse,
};

use crate::extractors::AuthUser;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_path_id;

/// Either an immediate membership or a pending request
pub enum JoinReply {
    Joined(Box<MemberResponse>),
    Requested(StatusResponse),
}

impl axum::response::IntoResponse for JoinReply {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::Joined(member) => Created(Json(*member)).into_response(),
            Self::Requested(status) => {
                crate::response::Accepted(Json(status)).into_response()
            }
        }
    }
}

/// Join a group (public: immediate; private: pending request)
///
/// POST /groups/{group_id}/join
pub async fn join_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
) -> ApiResult<JoinReply> {
    let group_id = parse_path_id(&group_id, "group_id")?;

    let service = JoinService::new(state.service_context());
    let outcome = service.request_join(group_id, auth.user_id).await?;

    Ok(match outcome {
        JoinOutcome::Joined(member) => JoinReply::Joined(member),
        JoinOutcome::Requested => JoinReply::Requested(StatusResponse::new(
            "Join request sent. An admin will review your request.",
        )),
    })
}

/// Pending join requests for a group
///
/// GET /groups/{group_id}/requests
pub async fn list_join_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<String>,
) -> ApiResult<Json<Vec<JoinRequestResponse>>> {
    let group_id = parse_path_id(&group_id, "group_id")?;

    let service = JoinService::new(state.service_context());
    let response = service.list_pending(group_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Accept or reject a pending join request
///
/// PUT /groups/{group_id}/requests/{user_id}
pub async fn review_join_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((group_id, user_id)): Path<(String, String)>,
    Json(request): Json<ReviewJoinRequest>,
) -> ApiResult<axum::response::Response> {
    use axum::response::IntoResponse;

    let group_id = parse_path_id(&group_id, "group_id")?;
    let user_id = parse_path_id(&user_id, "user_id")?;

    let service = JoinService::new(state.service_context());
    let member = service
        .review(group_id, auth.user_id, user_id, request.action)
        .await?;

    Ok(match member {
        Some(member) => Created(Json(member)).into_response(),
        None => NoContent.into_response(),
    })
}
