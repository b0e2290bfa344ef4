//! Dish type handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{DishType, DishTypeCreate, DishTypeReorder};

use crate::core::ServerState;
use crate::store::MenuStore;
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody, ValidatedJson};

fn slug_taken(slug: &str) -> AppError {
    AppError::with_message(
        ErrorCode::DishTypeSlugExists,
        format!("Dish type slug '{}' already exists", slug),
    )
    .with_detail("slug", slug)
}

/// GET /api/admin/dish-types - by display order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DishType>>> {
    Ok(Json(state.store.list_dish_types().await?))
}

/// POST /api/admin/dish-types
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<DishTypeCreate>,
) -> AppResult<(StatusCode, Json<DishType>)> {
    if state.store.find_dish_type_by_slug(&payload.slug).await?.is_some() {
        return Err(slug_taken(&payload.slug));
    }
    let dish_type = state.store.insert_dish_type(payload).await?;
    tracing::info!(dish_type_id = dish_type.id, slug = %dish_type.slug, "Dish type created");
    Ok((StatusCode::CREATED, Json(dish_type)))
}

/// PUT /api/admin/dish-types/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<DishTypeCreate>,
) -> AppResult<Json<DishType>> {
    let taken = state
        .store
        .find_dish_type_by_slug(&payload.slug)
        .await?
        .is_some_and(|existing| existing.id != id);
    if taken {
        return Err(slug_taken(&payload.slug));
    }
    let dish_type = state.store.update_dish_type(id, payload).await?;
    tracing::info!(dish_type_id = id, "Dish type updated");
    Ok(Json(dish_type))
}

/// DELETE /api/admin/dish-types/{id} - refused while dishes still use it
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !state.store.list_dishes(Some(id), false).await?.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::DishTypeHasDishes,
            format!("Dish type {} still has dishes", id),
        ));
    }
    if !state.store.delete_dish_type(id).await? {
        return Err(AppError::with_message(
            ErrorCode::DishTypeNotFound,
            format!("dish_type {} not found", id),
        ));
    }
    tracing::info!(dish_type_id = id, "Dish type deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/dish-types/reorder - apply `{orders: [{id, order}]}` in one transaction
pub async fn reorder(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<DishTypeReorder>,
) -> AppResult<Json<Vec<DishType>>> {
    state.store.reorder_dish_types(&payload.orders).await?;
    tracing::info!(count = payload.orders.len(), "Dish types reordered");
    Ok(Json(state.store.list_dish_types().await?))
}
