//! Bistro Server - restaurant website back-end
//!
//! # Overview
//!
//! Public endpoints serve the menu and take reservations, custom cake
//! inquiries, cart orders and contact messages. The admin area (JWT) lets
//! staff triage those records, maintain the menu and edit site settings.
//!
//! # Modules
//!
//! ```text
//! bistro-server/src/
//! ├── core/          # config, state, errors, server startup
//! ├── auth/          # JWT, Argon2, auth middleware
//! ├── store/         # Store traits, Postgres and in-memory backends
//! ├── reservations/  # capacity configuration and availability checks
//! ├── lifecycle/     # status transitions and capability checks
//! ├── api/           # HTTP routes and handlers
//! ├── middleware/    # request logging
//! └── utils/         # errors, logger, validated extractors
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod lifecycle;
pub mod middleware;
pub mod reservations;
pub mod store;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use store::{MemoryStore, PgStore, Store, StoreError};
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
