//! Dish handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{Dish, DishCreate, DishListQuery};

use crate::core::ServerState;
use crate::store::MenuStore;
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

async fn ensure_dish_type(state: &ServerState, type_id: i64) -> AppResult<()> {
    if state.store.get_dish_type(type_id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::DishTypeNotFound,
            format!("dish_type {} not found", type_id),
        )
        .with_detail("type_id", type_id));
    }
    Ok(())
}

/// GET /api/admin/dishes?type_id= - active and inactive, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DishListQuery>,
) -> AppResult<Json<Vec<Dish>>> {
    Ok(Json(state.store.list_dishes(query.type_id, false).await?))
}

/// POST /api/admin/dishes
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<DishCreate>,
) -> AppResult<(StatusCode, Json<Dish>)> {
    ensure_dish_type(&state, payload.type_id).await?;
    let dish = state.store.insert_dish(payload).await?;
    tracing::info!(dish_id = dish.id, type_id = dish.type_id, "Dish created");
    Ok((StatusCode::CREATED, Json(dish)))
}

/// PUT /api/admin/dishes/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<DishCreate>,
) -> AppResult<Json<Dish>> {
    ensure_dish_type(&state, payload.type_id).await?;
    let dish = state.store.update_dish(id, payload).await?;
    tracing::info!(dish_id = id, "Dish updated");
    Ok(Json(dish))
}

/// DELETE /api/admin/dishes/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !state.store.delete_dish(id).await? {
        return Err(AppError::with_message(
            ErrorCode::DishNotFound,
            format!("dish {} not found", id),
        ));
    }
    tracing::info!(dish_id = id, "Dish deleted");
    Ok(StatusCode::NO_CONTENT)
}
