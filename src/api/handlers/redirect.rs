//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;
use crate::utils::redirect_target::redirect_target;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes that cannot have been generated, then resolve the code
/// 2. Record the click (counter and event together)
/// 3. Return `302 Found` with `Location` set to the original URL, prefixed
///    with `https://` when it carries no `http(s)://` scheme
///
/// # Click Tracking
///
/// Recording runs in its own task so that a client disconnecting mid-request
/// cannot cancel a half-finished increment. A recording failure is logged and
/// does not affect the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let mapping = state
        .registry
        .resolve(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    let location = redirect_target(&mapping.original_url).into_owned();

    let recorder = state.recorder.clone();
    let recording = tokio::spawn(async move { recorder.record(&mapping).await });

    if let Err(e) = recording.await {
        tracing::warn!(code = %code, error = %e, "Click recording task failed");
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
