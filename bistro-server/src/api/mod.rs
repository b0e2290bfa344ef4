//! HTTP API
//!
//! Public site endpoints live under `/api`, the staff back-office under
//! `/api/admin` (see [`admin`]).
//!
//! - [`health`] - liveness and store connectivity
//! - [`menu`] - public dish listing and view counter
//! - [`reservations`] - availability check and booking
//! - [`custom_cakes`] - custom-cake inquiries
//! - [`customer_orders`] - cart orders
//! - [`contact`] - contact form

pub mod admin;
pub mod contact;
pub mod custom_cakes;
pub mod customer_orders;
pub mod health;
pub mod menu;
pub mod reservations;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::middleware;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, without the outer layers
pub fn routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(reservations::router())
        .merge(custom_cakes::router())
        .merge(customer_orders::router())
        .merge(contact::router())
        .merge(admin::router(state))
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };
    match HeaderValue::from_str(origin) {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Invalid CORS_ORIGIN, allowing any origin");
            CorsLayer::permissive()
        }
    }
}

/// Fully configured application, used by the server and by tests
pub fn build_router(state: ServerState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    routes(&state)
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(cors)
        .with_state(state)
}
