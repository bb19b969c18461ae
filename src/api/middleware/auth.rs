//! Bearer session authentication for `/api/urls/*`.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Resolves `Authorization: Bearer <token>` to the session's
/// [`Account`](crate::domain::entities::Account) and stores it in the request
/// extensions, where handlers pick it up with `Extension<Account>`.
///
/// A missing or malformed header, an unknown token and an expired session
/// all answer `401` with `WWW-Authenticate: Bearer`.
///
/// ```rust,ignore
/// let urls = url_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Missing or malformed bearer token" }),
            )
        })?;

    let account = state.auth_service.authenticate(&token).await?;
    tracing::debug!(account_id = account.id, "Request authenticated");

    parts.extensions.insert(account);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
