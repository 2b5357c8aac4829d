//! Direct messaging handlers
//!
//! With a `user_id` query the GET endpoint returns one thread; without it,
//! the caller's conversation summaries.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use agora_service::{MarkReadRequest, MessageService, SendMessageRequest};
use serde::Deserialize;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_path_id;

/// Query parameters for GET /messages
#[derive(Debug, Deserialize)]
pub struct MessageParams {
    /// Counterpart user to fetch the thread with
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Conversations, or one thread when `user_id` is given
///
/// GET /messages
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MessageParams>,
) -> ApiResult<Response> {
    let service = MessageService::new(state.service_context());

    match params.user_id.as_deref() {
        Some(raw) => {
            let other_id = parse_path_id(raw, "user_id")?;
            let thread = service.thread(auth.user_id, other_id).await?;
            Ok(Json(thread).into_response())
        }
        None => {
            let conversations = service.conversations(auth.user_id).await?;
            Ok(Json(conversations).into_response())
        }
    }
}

/// Send a direct message
///
/// POST /messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<agora_service::MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.send(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Mark messages from a sender as read
///
/// PATCH /messages
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<MarkReadRequest>,
) -> ApiResult<Json<agora_service::MarkReadResponse>> {
    let sender_id = parse_path_id(&request.sender_id, "sender_id")?;

    let service = MessageService::new(state.service_context());
    let response = service.mark_read(auth.user_id, sender_id).await?;
    Ok(Json(response))
}
