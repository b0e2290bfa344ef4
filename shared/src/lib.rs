//! Shared types for the bistro back-end
//!
//! Error codes and response envelopes, domain models, status enums and
//! validated request payloads used by the server and its API clients.

pub mod error;
pub mod models;
