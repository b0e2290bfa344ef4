//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// HTTP status sent with this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::InvalidReservationStatus
            | Self::InvalidOrderStatus
            | Self::InvalidCartOrderStatus
            | Self::CartEmpty
            | Self::InvalidSettingValue => StatusCode::BAD_REQUEST,

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied | Self::RoleRequired | Self::AdminRequired => {
                StatusCode::FORBIDDEN
            }

            Self::NotFound
            | Self::ReservationNotFound
            | Self::OrderNotFound
            | Self::CartOrderNotFound
            | Self::MessageNotFound
            | Self::DishNotFound
            | Self::DishTypeNotFound
            | Self::SettingNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists
            | Self::TransitionNotAllowed
            | Self::DishTypeSlugExists
            | Self::DishTypeHasDishes => StatusCode::CONFLICT,

            Self::InternalError | Self::StoreReadFailed | Self::StoreWriteFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        for code in [
            ErrorCode::ReservationNotFound,
            ErrorCode::CartOrderNotFound,
            ErrorCode::MessageNotFound,
            ErrorCode::SettingNotFound,
        ] {
            assert_eq!(code.http_status(), StatusCode::NOT_FOUND, "{code:?}");
        }
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::TransitionNotAllowed.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::DishTypeHasDishes.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_auth_and_role_status() {
        assert_eq!(
            ErrorCode::TokenExpired.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::AdminRequired.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_rejected_input_status() {
        assert_eq!(
            ErrorCode::InvalidReservationStatus.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::CartEmpty.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failures() {
        assert_eq!(
            ErrorCode::StoreWriteFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::StoreUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
