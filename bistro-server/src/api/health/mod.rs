//! Health check
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/health | GET | none |
//!
//! ```json
//! {
//!   "status": "ok",
//!   "timestamp": "2024-06-01T19:00:00Z",
//!   "database": "connected",
//!   "environment": "production",
//!   "version": "0.1.0"
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::core::ServerState;
use crate::store::Store;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    /// connected | disconnected
    database: &'static str,
    environment: String,
    version: &'static str,
}

/// Always 200; an unreachable store shows up as `"disconnected"`
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health check: store unreachable");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        database,
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
