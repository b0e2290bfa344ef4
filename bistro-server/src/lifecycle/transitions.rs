//! Status transition tables

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use shared::error::{AppError, ErrorCode};
use shared::models::{CartOrderStatus, InquiryStatus, ReservationStatus, UnknownVariant};
use thiserror::Error;

/// A refused status move
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transition from '{from}' to '{to}' is not allowed")]
pub struct InvalidTransition {
    pub from: String,
    pub to: String,
}

impl From<InvalidTransition> for AppError {
    fn from(err: InvalidTransition) -> Self {
        AppError::transition_not_allowed(&err.from, &err.to)
    }
}

/// Allowed moves between the states of one status type
///
/// A permissive table accepts any move between listed states. A restricted
/// table accepts only the pairs it was built with; writing the current state
/// again is always accepted.
#[derive(Debug, Clone)]
pub struct TransitionTable<S> {
    allowed: Option<HashSet<(S, S)>>,
}

impl<S> Default for TransitionTable<S> {
    fn default() -> Self {
        Self { allowed: None }
    }
}

impl<S> TransitionTable<S>
where
    S: Copy + Eq + Hash + fmt::Display,
{
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn restricted(pairs: impl IntoIterator<Item = (S, S)>) -> Self {
        Self {
            allowed: Some(pairs.into_iter().collect()),
        }
    }

    /// No pre-read of the current state is needed
    pub fn is_permissive(&self) -> bool {
        self.allowed.is_none()
    }

    pub fn allows(&self, from: S, to: S) -> bool {
        match &self.allowed {
            None => true,
            Some(pairs) => from == to || pairs.contains(&(from, to)),
        }
    }

    pub fn check(&self, from: S, to: S) -> Result<(), InvalidTransition> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }
}

/// A status enum that staff can set through the API
pub trait ManagedStatus: FromStr<Err = UnknownVariant> {
    /// Code reported for a status name that does not parse
    const UNKNOWN_CODE: ErrorCode;
}

impl ManagedStatus for ReservationStatus {
    const UNKNOWN_CODE: ErrorCode = ErrorCode::InvalidReservationStatus;
}

impl ManagedStatus for InquiryStatus {
    const UNKNOWN_CODE: ErrorCode = ErrorCode::InvalidOrderStatus;
}

impl ManagedStatus for CartOrderStatus {
    const UNKNOWN_CODE: ErrorCode = ErrorCode::InvalidCartOrderStatus;
}

/// Parse a status name from a request body; unknown names are a 400
pub fn parse_status<S: ManagedStatus>(raw: &str) -> Result<S, AppError> {
    raw.trim().parse::<S>().map_err(|e| {
        AppError::with_message(S::UNKNOWN_CODE, e.to_string())
            .with_detail("status", raw.to_string())
            .with_detail("kind", e.kind)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_allows_everything() {
        let table = TransitionTable::<InquiryStatus>::permissive();
        assert!(table.is_permissive());
        for from in InquiryStatus::ALL {
            for to in InquiryStatus::ALL {
                assert!(table.allows(*from, *to));
            }
        }
        assert!(table.check(InquiryStatus::Completed, InquiryStatus::New).is_ok());
    }

    #[test]
    fn test_restricted_refuses_unlisted_moves() {
        let table = TransitionTable::restricted([
            (ReservationStatus::Pending, ReservationStatus::Confirmed),
            (ReservationStatus::Waitlist, ReservationStatus::Confirmed),
        ]);
        assert!(!table.is_permissive());
        assert!(table.allows(ReservationStatus::Pending, ReservationStatus::Confirmed));
        assert!(table.allows(ReservationStatus::Cancelled, ReservationStatus::Cancelled));

        let err = table
            .check(ReservationStatus::Cancelled, ReservationStatus::Confirmed)
            .unwrap_err();
        assert_eq!(err.from, "cancelled");
        assert_eq!(err.to, "confirmed");

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::TransitionNotAllowed);
        assert_eq!(app.http_status(), http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            parse_status::<CartOrderStatus>("delivered").unwrap(),
            CartOrderStatus::Delivered
        );
        let err = parse_status::<CartOrderStatus>("shipped").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCartOrderStatus);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);

        let err = parse_status::<ReservationStatus>("seated").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidReservationStatus);
        let err = parse_status::<InquiryStatus>("baking").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);
    }
}
