//! Staff cart order handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{CartOrder, CartOrderStatus, StatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::lifecycle::{AuthContext, parse_status};
use crate::store::OrderStore;
use crate::utils::{AppResult, JsonBody};

/// GET /api/admin/customer-orders - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CartOrder>>> {
    Ok(Json(state.store.list_cart_orders().await?))
}

/// PUT /api/admin/customer-orders/{id}/status - body `{"status": "..."}`
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<StatusUpdate>,
) -> AppResult<Json<CartOrder>> {
    let status: CartOrderStatus = parse_status(&payload.status)?;
    let updated = state
        .lifecycle
        .set_cart_order_status(&AuthContext::from(&user), id, status)
        .await?;
    Ok(Json(updated))
}
