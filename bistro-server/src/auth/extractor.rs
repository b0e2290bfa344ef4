//! `CurrentUser` extractor
//!
//! Reuses the user stored by [`require_auth`](super::require_auth) when the
//! middleware ran, otherwise validates the bearer token itself.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::middleware::jwt_failure;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!(WARN, "auth_missing", uri = %parts.uri);
                return Err(AppError::unauthorized());
            }
        };

        let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
            security_log!(WARN, "auth_failed", error = %e, uri = %parts.uri);
            jwt_failure(&e)
        })?;

        let user = CurrentUser::try_from(claims)
            .map_err(|e| AppError::invalid_token(format!("Malformed token claims: {}", e)))?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
