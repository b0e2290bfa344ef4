//! Contact form handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{Message, MessageCreate, NewMessage};

use crate::core::ServerState;
use crate::store::MessageStore;
use crate::utils::{AppResult, ValidatedJson};

/// POST /api/contact - store a message as unread
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(form): ValidatedJson<MessageCreate>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let message = state.store.insert_message(NewMessage::from(form)).await?;
    tracing::info!(message_id = message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/contact - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(state.store.list_messages().await?))
}
