//! Unified error codes for the bistro back-end
//!
//! This module defines all error codes shared by the server and the web client.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Reservation errors
//! - 4xxx: Order errors (inquiry + cart)
//! - 5xxx: Message errors
//! - 6xxx: Menu errors
//! - 7xxx: Settings errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so the web client can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Status change refused by the transition table
    TransitionNotAllowed = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 3001,
    /// Unknown reservation status
    InvalidReservationStatus = 3002,

    // ==================== 4xxx: Order ====================
    /// Inquiry order not found
    OrderNotFound = 4001,
    /// Unknown inquiry order status
    InvalidOrderStatus = 4002,
    /// Cart order not found
    CartOrderNotFound = 4101,
    /// Unknown cart order status
    InvalidCartOrderStatus = 4102,
    /// Cart order has no items
    CartEmpty = 4103,

    // ==================== 5xxx: Message ====================
    /// Contact message not found
    MessageNotFound = 5001,

    // ==================== 6xxx: Menu ====================
    /// Dish not found
    DishNotFound = 6001,
    /// Dish type not found
    DishTypeNotFound = 6101,
    /// Dish type slug already exists
    DishTypeSlugExists = 6102,
    /// Dish type still has dishes
    DishTypeHasDishes = 6103,

    // ==================== 7xxx: Settings ====================
    /// Setting key not found
    SettingNotFound = 7001,
    /// Setting value rejected
    InvalidSettingValue = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Reading from the data store failed
    StoreReadFailed = 9003,
    /// Writing to the data store failed
    StoreWriteFailed = 9004,
    /// Data store unreachable
    StoreUnavailable = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::TransitionNotAllowed => "Status transition is not allowed",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InvalidReservationStatus => "Unknown reservation status",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidOrderStatus => "Unknown order status",
            ErrorCode::CartOrderNotFound => "Customer order not found",
            ErrorCode::InvalidCartOrderStatus => "Unknown customer order status",
            ErrorCode::CartEmpty => "Customer order has no items",

            // Message
            ErrorCode::MessageNotFound => "Message not found",

            // Menu
            ErrorCode::DishNotFound => "Dish not found",
            ErrorCode::DishTypeNotFound => "Dish type not found",
            ErrorCode::DishTypeSlugExists => "Dish type slug already exists",
            ErrorCode::DishTypeHasDishes => "Dish type still has dishes",

            // Settings
            ErrorCode::SettingNotFound => "Setting not found",
            ErrorCode::InvalidSettingValue => "Invalid setting value",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StoreReadFailed => "Failed to read from the data store",
            ErrorCode::StoreWriteFailed => "Failed to write to the data store",
            ErrorCode::StoreUnavailable => "Data store is unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            9 => Ok(ErrorCode::TransitionNotAllowed),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),

            // Reservation
            3001 => Ok(ErrorCode::ReservationNotFound),
            3002 => Ok(ErrorCode::InvalidReservationStatus),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidOrderStatus),
            4101 => Ok(ErrorCode::CartOrderNotFound),
            4102 => Ok(ErrorCode::InvalidCartOrderStatus),
            4103 => Ok(ErrorCode::CartEmpty),

            // Message
            5001 => Ok(ErrorCode::MessageNotFound),

            // Menu
            6001 => Ok(ErrorCode::DishNotFound),
            6101 => Ok(ErrorCode::DishTypeNotFound),
            6102 => Ok(ErrorCode::DishTypeSlugExists),
            6103 => Ok(ErrorCode::DishTypeHasDishes),

            // Settings
            7001 => Ok(ErrorCode::SettingNotFound),
            7002 => Ok(ErrorCode::InvalidSettingValue),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::StoreReadFailed),
            9004 => Ok(ErrorCode::StoreWriteFailed),
            9006 => Ok(ErrorCode::StoreUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::TransitionNotAllowed.code(), 9);

        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::ReservationNotFound.code(), 3001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::CartOrderNotFound.code(), 4101);
        assert_eq!(ErrorCode::MessageNotFound.code(), 5001);
        assert_eq!(ErrorCode::DishNotFound.code(), 6001);
        assert_eq!(ErrorCode::SettingNotFound.code(), 7001);

        assert_eq!(ErrorCode::StoreReadFailed.code(), 9003);
        assert_eq!(ErrorCode::StoreWriteFailed.code(), 9004);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(3002), Ok(ErrorCode::InvalidReservationStatus));
        assert_eq!(ErrorCode::try_from(4103), Ok(ErrorCode::CartEmpty));
        assert_eq!(ErrorCode::try_from(9004), Ok(ErrorCode::StoreWriteFailed));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(8001), Err(InvalidErrorCode(8001)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::ReservationNotFound).unwrap();
        assert_eq!(json, "3001");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("5001").unwrap();
        assert_eq!(code, ErrorCode::MessageNotFound);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::StoreReadFailed.message(),
            "Failed to read from the data store"
        );
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::TransitionNotAllowed,
            ErrorCode::InvalidCredentials,
            ErrorCode::AdminRequired,
            ErrorCode::InvalidCartOrderStatus,
            ErrorCode::DishTypeSlugExists,
            ErrorCode::InvalidSettingValue,
            ErrorCode::StoreUnavailable,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
