//! Utilities
//!
//! - [`AppError`] / [`ErrorBody`] (from shared::error)
//! - [`logger`] - tracing setup
//! - [`validation`] - request body extractors and validator bridging

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use validation::{JsonBody, ValidatedJson};
