//! Custom-cake inquiry handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{InquiryCreate, InquiryOrder, NewInquiry};

use crate::core::ServerState;
use crate::store::OrderStore;
use crate::utils::{AppResult, ValidatedJson};

/// POST /api/custom-cakes - new inquiry, status `new`
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(form): ValidatedJson<InquiryCreate>,
) -> AppResult<(StatusCode, Json<InquiryOrder>)> {
    let inquiry = state.store.insert_inquiry(NewInquiry::from(form)).await?;
    tracing::info!(
        order_id = inquiry.id,
        type_event = %inquiry.type_event,
        persons = inquiry.persons,
        "Custom-cake inquiry received"
    );
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// GET /api/custom-cakes - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InquiryOrder>>> {
    Ok(Json(state.store.list_inquiries().await?))
}
