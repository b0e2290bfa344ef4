//! Settings handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{MAX_CAPACITY_KEY, Setting, SettingUpdate};

use crate::core::ServerState;
use crate::store::SettingsStore;
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody};

/// GET /api/admin/settings
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Setting>>> {
    Ok(Json(state.store.list_settings().await?))
}

/// GET /api/admin/settings/{key}
pub async fn get_by_key(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> AppResult<Json<Setting>> {
    let setting = state.store.get_setting(&key).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::SettingNotFound,
            format!("setting {} not found", key),
        )
    })?;
    Ok(Json(setting))
}

fn validate_value(key: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if key == MAX_CAPACITY_KEY && value.parse::<u32>().is_err() {
        return Err(AppError::with_message(
            ErrorCode::InvalidSettingValue,
            "max_capacity must be a non-negative integer",
        )
        .with_detail("value", value));
    }
    Ok(value.to_string())
}

/// PUT /api/admin/settings/{key} - body `{"value": "..."}`
///
/// Writing `max_capacity` refreshes the capacity configuration.
pub async fn update(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    JsonBody(payload): JsonBody<SettingUpdate>,
) -> AppResult<Json<Setting>> {
    let value = validate_value(&key, &payload.value)?;
    let setting = state.store.upsert_setting(&key, &value).await?;

    if key == MAX_CAPACITY_KEY {
        state.capacity.refresh().await?;
    }
    tracing::info!(key = %setting.key, value = %setting.value, "Setting updated");
    Ok(Json(setting))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_value_must_be_integer() {
        assert_eq!(validate_value(MAX_CAPACITY_KEY, " 40 ").unwrap(), "40");
        assert!(validate_value(MAX_CAPACITY_KEY, "-1").is_err());
        assert!(validate_value(MAX_CAPACITY_KEY, "forty").is_err());
        assert_eq!(validate_value("opening_hours", "12h-23h").unwrap(), "12h-23h");
    }
}
