//! `AppError` and the JSON error body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by every handler
///
/// Rendered as an [`ErrorBody`] with the status from
/// [`ErrorCode::http_status`].
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Field errors or context such as the offending id
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the default message of `code`
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Auth ====================

    /// No credentials were presented
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    // ==================== Domain ====================

    /// Unique key or foreign key clash reported by the store
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn transition_not_allowed(from: &str, to: &str) -> Self {
        Self::with_message(
            ErrorCode::TransitionNotAllowed,
            format!("Cannot move from '{}' to '{}'", from, to),
        )
        .with_detail("from", from)
        .with_detail("to", to)
    }

    // ==================== System ====================

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// The store could not be read; the cause is logged, not returned
    pub fn store_read() -> Self {
        Self::new(ErrorCode::StoreReadFailed)
    }

    /// The store rejected or lost a write; the cause is logged, not returned
    pub fn store_write() -> Self {
        Self::new(ErrorCode::StoreWriteFailed)
    }

    pub fn store_unavailable() -> Self {
        Self::new(ErrorCode::StoreUnavailable)
    }
}

/// Result type for handlers
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response
///
/// ```json
/// {"code": 2, "message": "Validation failed", "details": {"phone": ["phone is required"]}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error");
        }
        (self.http_status(), axum::Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_default_message_from_code() {
        let err = AppError::new(ErrorCode::ReservationNotFound);
        assert_eq!(err.message, "Reservation not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert!(err.details.is_none());
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("phone", "required")
            .with_detail("guests", 0);
        let details = err.details.unwrap();
        assert_eq!(details["phone"], "required");
        assert_eq!(details["guests"], 0);
    }

    #[test]
    fn test_transition_not_allowed() {
        let err = AppError::transition_not_allowed("cancelled", "confirmed");
        assert_eq!(err.code, ErrorCode::TransitionNotAllowed);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        let details = err.details.unwrap();
        assert_eq!(details["from"], "cancelled");
        assert_eq!(details["to"], "confirmed");
    }

    #[test]
    fn test_store_failures_hide_the_cause() {
        let err = AppError::store_write();
        assert_eq!(err.message, "Failed to write to the data store");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::store_unavailable().http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_body_shape() {
        let err = AppError::new(ErrorCode::CartEmpty);
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": 4103, "message": "Customer order has no items"})
        );

        let body: ErrorBody =
            serde_json::from_str(r#"{"code":2001,"message":"nope","details":{"capability":"manage_settings"}}"#)
                .unwrap();
        assert_eq!(body.code, ErrorCode::PermissionDenied);
        assert_eq!(body.details.unwrap()["capability"], "manage_settings");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::invalid_credentials().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
