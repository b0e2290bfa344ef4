//! Data models
//!
//! Shared between bistro-server and the web front-end (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All entity IDs are `i64` (Postgres BIGSERIAL), staff users use UUIDs.

pub mod cart_order;
pub mod dashboard;
pub mod inquiry;
pub mod menu;
pub mod message;
pub mod reservation;
pub mod serde_helpers;
pub mod setting;
pub mod staff;
pub mod status;

// Re-exports
pub use cart_order::*;
pub use dashboard::*;
pub use inquiry::*;
pub use menu::*;
pub use message::*;
pub use reservation::*;
pub use setting::*;
pub use staff::*;
pub use status::*;
