//! Custom-cake inquiry management

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::lifecycle::Capability;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let write_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_role(
            Capability::ManageBookings.roles(),
        )));

    read_routes.merge(write_routes)
}
