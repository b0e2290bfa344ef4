use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{InquiryOrder, InquiryStatus, StatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::lifecycle::{AuthContext, parse_status};
use crate::store::OrderStore;
use crate::utils::{AppResult, JsonBody};

/// GET /api/admin/orders - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InquiryOrder>>> {
    Ok(Json(state.store.list_inquiries().await?))
}

/// PUT /api/admin/orders/{id}/status - body `{"status": "..."}`
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<StatusUpdate>,
) -> AppResult<Json<InquiryOrder>> {
    let status: InquiryStatus = parse_status(&payload.status)?;
    let updated = state
        .lifecycle
        .set_inquiry_status(&AuthContext::from(&user), id, status)
        .await?;
    Ok(Json(updated))
}
