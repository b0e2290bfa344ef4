//! Staff reservation handlers
//!
//! Status changes go through the lifecycle manager; confirming a booking
//! does not re-check slot capacity.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Reservation, ReservationStatus, StatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::lifecycle::{AuthContext, parse_status};
use crate::store::ReservationStore;
use crate::utils::{AppResult, JsonBody};

/// GET /api/admin/reservations - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    Ok(Json(state.store.list_reservations().await?))
}

/// PUT /api/admin/reservations/{id}/status - body `{"status": "..."}`
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<StatusUpdate>,
) -> AppResult<Json<Reservation>> {
    let status: ReservationStatus = parse_status(&payload.status)?;
    let updated = state
        .lifecycle
        .set_reservation_status(&AuthContext::from(&user), id, status)
        .await?;
    Ok(Json(updated))
}
