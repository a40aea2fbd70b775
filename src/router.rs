//! Interceptor chain orchestration.
//!
//! Per-request order is fixed: session lifetime guard → role router →
//! route handler, with the response hardening stage wrapped around the
//! whole chain so it runs on every response a stage can produce, including
//! guard short-circuits. Axum layers execute outermost-last-added, hence
//! the reversed `.layer` order below.

use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::logging::logging_middleware;
use crate::middleware::role::role_router;
use crate::middleware::security_headers::security_headers;
use crate::middleware::session_guard::session_guard;
use crate::modules::auth::router::init_auth_router;
use crate::modules::dashboards::router::init_dashboards_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(init_dashboards_router())
        .merge(init_auth_router())
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state.clone(), role_router))
        .layer(middleware::from_fn_with_state(state.clone(), session_guard))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true)
        })
}
