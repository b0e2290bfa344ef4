//! Public menu handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::models::{Dish, MenuQuery};

use crate::core::ServerState;
use crate::store::MenuStore;
use crate::utils::AppResult;

/// GET /api/menu?category=<slug> - active dishes, newest first
///
/// An unknown category slug yields an empty list rather than an error.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<Dish>>> {
    let category = query.category.filter(|c| !c.trim().is_empty());

    let dishes = match category {
        Some(slug) => match state.store.find_dish_type_by_slug(&slug).await? {
            Some(dish_type) => state.store.list_dishes(Some(dish_type.id), true).await?,
            None => Vec::new(),
        },
        None => state.store.list_dishes(None, true).await?,
    };
    Ok(Json(dishes))
}

#[derive(Debug, Serialize)]
pub struct ViewCount {
    pub id: i64,
    pub view_count: i64,
}

/// POST /api/menu/{id}/view - count one dish view
pub async fn record_view(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ViewCount>> {
    let view_count = state.store.increment_dish_views(id).await?;
    Ok(Json(ViewCount { id, view_count }))
}
