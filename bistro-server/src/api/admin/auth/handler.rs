//! Login / logout handlers

use axum::{Json, extract::State};
use serde::Serialize;
use shared::models::{LoginRequest, LoginResponse, UserInfo};

use crate::auth::verify_password;
use crate::core::ServerState;
use crate::security_log;
use crate::store::UserStore;
use crate::utils::{AppError, AppResult, ValidatedJson};

/// POST /api/admin/auth/login
///
/// Unknown email and wrong password give the same 401.
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state.store.find_user_by_email(req.email.trim()).await?;

    let Some(user) = user.filter(|u| verify_password(&req.password, &u.password_hash)) else {
        security_log!(WARN, "login_failed", email = %req.email);
        return Err(AppError::invalid_credentials());
    };

    let token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(e.to_string()))?;

    security_log!(INFO, "login_success", user_id = %user.id, role = user.role.as_str());

    Ok(Json(LoginResponse {
        token,
        user: UserInfo::from(&user),
    }))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    message: &'static str,
}

/// POST /api/admin/auth/logout - tokens are stateless, nothing to revoke
pub async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse {
        message: "Logged out",
    })
}
