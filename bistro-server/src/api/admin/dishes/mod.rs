//! Dish management

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::lifecycle::Capability;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/dishes", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .layer(middleware::from_fn(require_role(Capability::ManageMenu.roles())));

    let delete_routes = Router::new()
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_role(Capability::DeleteMenu.roles())));

    read_routes.merge(write_routes).merge(delete_routes)
}
