//! Authentication middleware
//!
//! [`require_auth`] validates the bearer token and stores the [`CurrentUser`]
//! in the request extensions; [`require_role`] gates a router on the roles
//! it lists and must sit inside `require_auth`.

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::ErrorCode;
use shared::models::StaffRole;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

pub(crate) fn jwt_failure(err: &JwtError) -> AppError {
    match err {
        JwtError::ExpiredToken => AppError::token_expired(),
        _ => AppError::invalid_token("Invalid token"),
    }
}

/// Authenticate the caller from `Authorization: Bearer <token>`
///
/// | Failure | Response |
/// |---------|----------|
/// | no header | 401 `NotAuthenticated` |
/// | malformed header / bad token | 401 `TokenInvalid` |
/// | expired token | 401 `TokenExpired` |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!(WARN, "auth_missing", uri = %req.uri());
            return Err(AppError::unauthorized());
        }
    };

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        security_log!(WARN, "auth_failed", error = %e, uri = %req.uri());
        jwt_failure(&e)
    })?;

    let user = CurrentUser::try_from(claims).map_err(|e| {
        security_log!(WARN, "auth_failed", error = %e, uri = %req.uri());
        AppError::invalid_token(format!("Malformed token claims: {}", e))
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require one of `roles`
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/settings/{key}", put(handler::update))
///     .layer(middleware::from_fn(require_role(&[StaffRole::Admin])));
/// ```
pub fn require_role(
    roles: &'static [StaffRole],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            if !user.has_role(roles) {
                let required: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
                security_log!(
                    WARN,
                    "role_denied",
                    user_id = %user.id,
                    user_role = user.role.as_str(),
                    required = ?required
                );
                let code = if roles == [StaffRole::Admin] {
                    ErrorCode::AdminRequired
                } else {
                    ErrorCode::RoleRequired
                };
                return Err(AppError::new(code).with_detail("required", required.join(",")));
            }

            Ok(next.run(req).await)
        })
    }
}
