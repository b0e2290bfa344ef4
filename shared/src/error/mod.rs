//! Unified error system for the bistro back-end
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: error with code, message and optional details
//! - [`ErrorBody`]: JSON body of error responses
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Reservation errors
//! - 4xxx: Order errors (inquiries and cart orders)
//! - 5xxx: Contact message errors
//! - 6xxx: Menu errors
//! - 7xxx: Settings errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ReservationNotFound);
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Validation failed")
//!     .with_detail("phone", "required");
//!
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code.code(), 2);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
