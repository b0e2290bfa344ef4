//! Cart order handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{CartOrder, CartOrderCreate, NewCartOrder};
use validator::Validate;

use crate::core::ServerState;
use crate::store::OrderStore;
use crate::utils::validation::validation_error;
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody};

/// POST /api/customer-orders - new cart order, status `pending`
///
/// The total is computed here from the submitted items and stored once.
/// An empty cart is reported as `CartEmpty` before field validation runs.
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(form): JsonBody<CartOrderCreate>,
) -> AppResult<(StatusCode, Json<CartOrder>)> {
    if form.items.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }
    form.validate().map_err(|e| validation_error(&e))?;
    let order = state.store.insert_cart_order(NewCartOrder::from(form)).await?;
    tracing::info!(
        customer_order_id = order.id,
        delivery_type = %order.delivery_type,
        items = order.items.len(),
        total_price = order.total_price,
        "Cart order received"
    );
    Ok((StatusCode::CREATED, Json(order)))
}
