//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect (public)
//! - `GET  /health`      - Store health check (public)
//! - `/api/auth/*`       - Registration, login, password reset (public, rate limited)
//! - `/api/urls/*`       - Mappings and analytics (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the account endpoints
//! - **Authentication** - Bearer session token resolved to an account
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let auth_router = api::routes::auth_routes().layer(rate_limit::auth_layer());

    let url_router = api::routes::url_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api/auth", auth_router)
        .nest("/api/urls", url_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
