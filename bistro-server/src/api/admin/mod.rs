//! Staff back-office API (`/api/admin`)
//!
//! Everything except `auth` sits behind [`require_auth`]; write routes are
//! further gated with [`require_role`] using the role sets of
//! [`Capability`](crate::lifecycle::Capability).
//!
//! | Area | Read | Write | Delete |
//! |------|------|-------|--------|
//! | dashboard | any staff | - | - |
//! | dish-types, dishes | any staff | admin, manager | admin |
//! | reservations, orders, customer-orders | any staff | admin, manager | - |
//! | messages | any staff | any staff | admin |
//! | settings | any staff | admin | - |
//!
//! [`require_auth`]: crate::auth::require_auth
//! [`require_role`]: crate::auth::require_role

pub mod auth;
pub mod customer_orders;
pub mod dashboard;
pub mod dish_types;
pub mod dishes;
pub mod messages;
pub mod orders;
pub mod reservations;
pub mod settings;

use axum::{Router, middleware};

use crate::auth::require_auth;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let protected = Router::new()
        .merge(dashboard::router())
        .merge(dish_types::router())
        .merge(dishes::router())
        .merge(reservations::router())
        .merge(orders::router())
        .merge(customer_orders::router())
        .merge(messages::router())
        .merge(settings::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest("/api/admin", auth::router().merge(protected))
}
