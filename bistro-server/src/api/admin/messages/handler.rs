//! Message handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{MarkAllReadResult, Message, ReadFlagUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::lifecycle::AuthContext;
use crate::store::MessageStore;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/admin/messages - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(state.store.list_messages().await?))
}

/// An empty body means `{"is_read": true}`
fn parse_read_flag(body: &[u8]) -> AppResult<bool> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(true);
    }
    let update: ReadFlagUpdate = serde_json::from_slice(body)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidRequest, e.to_string()))?;
    Ok(update.is_read.unwrap_or(true))
}

/// PUT /api/admin/messages/{id}/read - body `{"is_read": bool}` (optional)
pub async fn set_read(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Json<Message>> {
    let is_read = parse_read_flag(&body)?;
    let message = state
        .lifecycle
        .set_message_read(&AuthContext::from(&user), id, is_read)
        .await?;
    Ok(Json(message))
}

/// PUT /api/admin/messages/read-all - `{"updated": n}`, 0 when nothing was unread
pub async fn mark_all_read(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<MarkAllReadResult>> {
    let updated = state
        .lifecycle
        .mark_all_messages_read(&AuthContext::from(&user))
        .await?;
    Ok(Json(MarkAllReadResult { updated }))
}

/// DELETE /api/admin/messages/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !state.store.delete_message(id).await? {
        return Err(AppError::with_message(
            ErrorCode::MessageNotFound,
            format!("message {} not found", id),
        ));
    }
    tracing::info!(message_id = id, "Message deleted");
    Ok(StatusCode::NO_CONTENT)
}
