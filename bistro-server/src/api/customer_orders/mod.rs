//! Cart order API

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customer-orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", post(handler::create))
}
