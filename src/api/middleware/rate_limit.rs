//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP limiter type shared by the rate limited route groups.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates the rate limiter for the public account endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let auth_routes = Router::new()
///     .route("/login", post(login_handler))
///     .layer(rate_limit::auth_layer());
/// ```
pub fn auth_layer() -> RateLimitLayer {
    // Both values are non-zero, which is the only failure case of finish()
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(10)
            .finish()
            .expect("non-zero rate limit settings"),
    );

    GovernorLayer::new(governor_conf)
}
