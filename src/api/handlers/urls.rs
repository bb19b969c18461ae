//! Handlers for creating and listing the caller's mappings.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::mapping::{ShortenRequest, UrlMappingResponse};
use crate::domain::entities::Account;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL owned by the authenticated account.
///
/// # Endpoint
///
/// `POST /api/urls/shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://go.dev" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "originalUrl": "https://go.dev",
///   "shortUrl": "http://localhost:3000/Ab3dE9xZ",
///   "clickCount": 0,
///   "createdDate": "2024-05-01T10:00:00Z",
///   "username": "alice"
/// }
/// ```
///
/// # Errors
///
/// - 400 if `originalUrl` is blank or too long
/// - 503 if no free short code was found
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<UrlMappingResponse>, AppError> {
    payload.validate()?;

    let mapping = state
        .registry
        .create(&payload.original_url, account.id)
        .await?;

    let short_url = state.short_url(&mapping.short_code);

    Ok(Json(UrlMappingResponse::new(
        mapping,
        short_url,
        &account.username,
    )))
}

/// Lists the authenticated account's mappings, oldest first.
///
/// # Endpoint
///
/// `GET /api/urls/myurls`
pub async fn my_urls_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<Json<Vec<UrlMappingResponse>>, AppError> {
    let mappings = state.registry.list_by_owner(account.id).await?;

    let items = mappings
        .into_iter()
        .map(|m| {
            let short_url = state.short_url(&m.short_code);
            UrlMappingResponse::new(m, short_url, &account.username)
        })
        .collect();

    Ok(Json(items))
}
