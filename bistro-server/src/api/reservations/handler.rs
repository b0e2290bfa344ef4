//! Public reservation handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{Availability, AvailabilityQuery, Reservation, ReservationCreate};

use crate::core::ServerState;
use crate::store::ReservationStore;
use crate::utils::{AppResult, JsonBody};

/// POST /api/reservations/check - capacity for one slot
pub async fn check(
    State(state): State<ServerState>,
    JsonBody(query): JsonBody<AvailabilityQuery>,
) -> AppResult<Json<Availability>> {
    let availability = state
        .availability
        .check_availability(&query.date, &query.time)
        .await?;
    Ok(Json(availability))
}

/// POST /api/reservations - book as `pending`, or `waitlist` when the slot is full
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(form): JsonBody<ReservationCreate>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.availability.create_reservation(form).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /api/reservations - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.store.list_reservations().await?;
    Ok(Json(reservations))
}
