//! Input validation helpers
//!
//! Body extractors that turn JSON and `validator` failures into 400
//! [`AppError`]s with per-field details, instead of axum's plain-text 422.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::utils::{AppError, ErrorCode};

/// Convert `validator` errors into a `ValidationFailed` error.
///
/// Each failing field becomes a detail entry holding the list of messages
/// (or rule codes when no message was given).
pub fn validation_error(errors: &ValidationErrors) -> AppError {
    let mut err = AppError::with_message(ErrorCode::ValidationFailed, "Validation failed");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| {
                let text = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                Value::String(text)
            })
            .collect();
        err = err.with_detail(field.to_string(), Value::Array(messages));
    }
    if err.details.is_none() {
        // Only nested or struct-level failures
        err = err.with_detail("errors", errors.to_string());
    }
    err
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let code = match rejection {
        JsonRejection::MissingJsonContentType(_) => ErrorCode::InvalidFormat,
        _ => ErrorCode::InvalidRequest,
    };
    AppError::with_message(code, rejection.body_text())
}

/// JSON body whose parse failures answer 400 with an [`AppError`] body
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(Self(value))
    }
}

/// JSON body that must also pass its `validator` rules
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate().map_err(|e| validation_error(&e))?;
        Ok(Self(value))
    }
}
