//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod auth;
pub mod health;
pub mod redirect;
pub mod urls;

pub use analytics::{mapping_analytics_handler, total_clicks_handler};
pub use auth::{
    forgot_password_handler, login_handler, register_handler, reset_password_handler,
};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use urls::{my_urls_handler, shorten_handler};
