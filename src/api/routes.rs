//! API route configuration.

use crate::api::handlers::{
    forgot_password_handler, login_handler, mapping_analytics_handler, my_urls_handler,
    register_handler, reset_password_handler, shorten_handler, total_clicks_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public account routes, mounted under `/api/auth`.
///
/// # Endpoints
///
/// - `POST /register`        - Create an account and log in
/// - `POST /login`           - Issue a bearer token
/// - `POST /forgot-password` - Mail a password-reset link
/// - `POST /reset-password`  - Consume a reset token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/forgot-password", post(forgot_password_handler))
        .route("/reset-password", post(reset_password_handler))
}

/// Mapping and analytics routes, mounted under `/api/urls`.
///
/// All of them require Bearer authentication; handlers read the caller's
/// [`crate::domain::entities::Account`] from request extensions.
///
/// # Endpoints
///
/// - `POST /shorten`           - Create a short URL
/// - `GET  /myurls`            - List the caller's short URLs
/// - `GET  /analytics/{code}`  - Daily clicks of one short URL
/// - `GET  /totalClicks`       - Daily clicks across the caller's short URLs
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/myurls", get(my_urls_handler))
        .route("/analytics/{code}", get(mapping_analytics_handler))
        .route("/totalClicks", get(total_clicks_handler))
}
