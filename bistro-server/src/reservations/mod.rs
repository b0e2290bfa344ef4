//! Reservations
//!
//! - [`CapacityConfig`] - where the per-slot capacity comes from
//! - [`AvailabilityChecker`] - capacity check and capacity-gated creation

pub mod availability;
pub mod capacity;

pub use availability::{AvailabilityChecker, ReservationError};
pub use capacity::{CapacityConfig, CapacityMode};
