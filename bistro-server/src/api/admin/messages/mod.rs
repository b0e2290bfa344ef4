//! Contact message triage

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, put},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::lifecycle::Capability;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/messages", routes())
}

fn routes() -> Router<ServerState> {
    // Read flags are open to every authenticated staff role
    let triage_routes = Router::new()
        .route("/", get(handler::list))
        .route("/read-all", put(handler::mark_all_read))
        .route("/{id}/read", put(handler::set_read));

    let delete_routes = Router::new()
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_role(Capability::DeleteMessages.roles())));

    triage_routes.merge(delete_routes)
}
