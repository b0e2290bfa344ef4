//! Back-office authentication
//!
//! - [`JwtService`] - token issue and validation
//! - [`CurrentUser`] - authenticated staff member
//! - [`require_auth`] / [`require_role`] - router middleware
//! - [`password`] - argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
pub use password::{hash_password, verify_password};
