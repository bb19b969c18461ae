#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use snipurl::api::handlers::{health_handler, redirect_handler};
use snipurl::api::middleware::auth;
use snipurl::api::routes::{auth_routes, url_routes};
use snipurl::application::services::{AuthSettings, Mailer};
use snipurl::error::AppError;
use snipurl::infrastructure::Stores;
use snipurl::infrastructure::memory::MemoryStore;
use snipurl::state::{AppSettings, AppState};

pub const BASE_URL: &str = "http://sho.rt";

pub fn test_settings() -> AppSettings {
    AppSettings {
        public_base_url: BASE_URL.to_string(),
        auth: AuthSettings {
            signing_secret: "test-signing-secret".to_string(),
            public_base_url: BASE_URL.to_string(),
            ..AuthSettings::default()
        },
        ..AppSettings::default()
    }
}

/// Reset links captured instead of mailed.
#[derive(Default)]
pub struct CapturingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl CapturingMailer {
    pub fn last_token(&self) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        sent.last()
            .and_then(|(_, url)| url.split("token=").nth(1))
            .map(str::to_string)
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send_password_reset(&self, email: &str, reset_url: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), reset_url.to_string()));
        Ok(())
    }
}

pub fn create_test_state() -> AppState {
    AppState::new(Stores::memory(), test_settings())
}

pub fn create_test_state_with_store(store: Arc<MemoryStore>) -> AppState {
    AppState::new(Stores::from_memory(store), test_settings())
}

pub fn create_test_state_with_mailer(mailer: Arc<CapturingMailer>) -> AppState {
    AppState::with_mailer(Stores::memory(), test_settings(), mailer)
}

/// Every route except the per-IP rate limit, which needs a peer address.
pub fn test_router(state: AppState) -> Router {
    let url_router =
        url_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api/auth", auth_routes())
        .nest("/api/urls", url_router)
        .with_state(state)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_router(state)).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Registers `username` and returns its bearer token.
pub async fn register(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "s3cret-pass"
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Shortens `url` as the token's owner and returns the short code.
pub async fn shorten(server: &TestServer, token: &str, url: &str) -> String {
    let response = server
        .post("/api/urls/shorten")
        .add_header("Authorization", bearer(token))
        .json(&json!({ "originalUrl": url }))
        .await;

    response.assert_status_ok();
    let short_url = response.json::<Value>()["shortUrl"]
        .as_str()
        .unwrap()
        .to_string();

    short_url.rsplit('/').next().unwrap().to_string()
}
