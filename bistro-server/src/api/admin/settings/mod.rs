//! Site settings

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::lifecycle::Capability;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/settings", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{key}", get(handler::get_by_key));

    let write_routes = Router::new()
        .route("/{key}", put(handler::update))
        .layer(middleware::from_fn(require_role(
            Capability::ManageSettings.roles(),
        )));

    read_routes.merge(write_routes)
}
