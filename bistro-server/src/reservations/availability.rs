//! Availability checker
//!
//! Capacity is counted per exact `(date, time)` slot over `confirmed`
//! reservations only. Public submissions are never confirmed directly: they
//! land as `pending` when the slot has room and as `waitlist` otherwise.

use std::sync::Arc;

use shared::error::AppError;
use shared::models::{Availability, NewReservation, Reservation, ReservationCreate, ReservationStatus};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::CapacityConfig;
use crate::store::{Store, StoreError};
use crate::utils::validation::validation_error;

/// Reservation creation failure
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("invalid reservation: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::Validation(errors) => validation_error(&errors),
            ReservationError::Store(e) => e.into(),
        }
    }
}

/// Capacity check and capacity-gated reservation creation
#[derive(Clone)]
pub struct AvailabilityChecker {
    store: Arc<dyn Store>,
    capacity: CapacityConfig,
}

impl AvailabilityChecker {
    pub fn new(store: Arc<dyn Store>, capacity: CapacityConfig) -> Self {
        Self { store, capacity }
    }

    pub fn capacity(&self) -> &CapacityConfig {
        &self.capacity
    }

    /// Whether the slot still has room
    ///
    /// `available` is `current_count < max_capacity`; the party size of a
    /// pending submission is not added. Any store failure is returned as is,
    /// never read as "available".
    pub async fn check_availability(
        &self,
        date: &str,
        time: &str,
    ) -> Result<Availability, StoreError> {
        let max_capacity = self.capacity.max_capacity().await?;
        let current_count = self.store.sum_confirmed_persons(date, time).await?;

        let availability = Availability {
            available: current_count < max_capacity,
            current_count,
            max_capacity,
        };
        tracing::debug!(
            date,
            time,
            current_count,
            max_capacity,
            available = availability.available,
            "Availability checked"
        );
        Ok(availability)
    }

    /// Validate, check the slot, then persist once as `pending` or `waitlist`
    pub async fn create_reservation(
        &self,
        form: ReservationCreate,
    ) -> Result<Reservation, ReservationError> {
        form.validate()?;

        let availability = self.check_availability(&form.date, &form.time).await?;
        let status = if availability.available {
            ReservationStatus::Pending
        } else {
            ReservationStatus::Waitlist
        };

        let reservation = self
            .store
            .insert_reservation(NewReservation::from_form(form, status))
            .await?;

        tracing::info!(
            reservation_id = reservation.id,
            date = %reservation.date,
            time = %reservation.time,
            persons = reservation.persons,
            status = %reservation.status,
            "Reservation created"
        );
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::CapacityMode;
    use crate::store::{MemoryStore, ReservationStore, SettingsStore};
    use shared::models::MAX_CAPACITY_KEY;

    fn checker(store: Arc<MemoryStore>) -> AvailabilityChecker {
        let capacity = CapacityConfig::new(store.clone(), CapacityMode::Live, 50);
        AvailabilityChecker::new(store, capacity)
    }

    fn form(guests: i32) -> ReservationCreate {
        ReservationCreate {
            name: "Amina".into(),
            phone: "0600000000".into(),
            email: None,
            date: "2024-06-01".into(),
            time: "19:00".into(),
            guests,
            preference: None,
            notes: None,
        }
    }

    async fn confirmed(store: &MemoryStore, persons: i32) {
        store
            .insert_reservation(NewReservation {
                full_name: "Seed".into(),
                phone: "0".into(),
                email: None,
                date: "2024-06-01".into(),
                time: "19:00".into(),
                persons,
                notes: None,
                status: ReservationStatus::Confirmed,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_slot_uses_default_capacity() {
        let store = Arc::new(MemoryStore::new());
        let availability = checker(store)
            .check_availability("2024-06-01", "19:00")
            .await
            .unwrap();
        assert_eq!(
            availability,
            Availability {
                available: true,
                current_count: 0,
                max_capacity: 50
            }
        );
    }

    #[tokio::test]
    async fn test_full_slot_is_unavailable_and_waitlists() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_setting(MAX_CAPACITY_KEY, "2").await.unwrap();
        confirmed(&store, 1).await;
        confirmed(&store, 1).await;
        let checker = checker(store);

        let availability = checker.check_availability("2024-06-01", "19:00").await.unwrap();
        assert!(!availability.available);
        assert_eq!(availability.current_count, 2);
        assert_eq!(availability.max_capacity, 2);

        let reservation = checker.create_reservation(form(1)).await.unwrap();
        assert_eq!(reservation.status, ReservationStatus::Waitlist);
    }

    #[tokio::test]
    async fn test_party_size_not_added_before_comparing() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_setting(MAX_CAPACITY_KEY, "10").await.unwrap();
        confirmed(&store, 9).await;

        let reservation = checker(store).create_reservation(form(8)).await.unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_persisted() {
        let store = Arc::new(MemoryStore::new());
        let err = checker(store.clone())
            .create_reservation(form(0))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::Validation(_)));
        assert!(store.list_reservations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_is_not_available() {
        let store = Arc::new(MemoryStore::new());
        store.set_unavailable(true);
        let err = checker(store)
            .check_availability("2024-06-01", "19:00")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Read(_)));
    }
}
