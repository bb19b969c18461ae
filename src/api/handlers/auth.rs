//! Handlers for registration, login and password reset.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
    ResetPasswordRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Registers an account and returns a bearer token for it.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "s3cret!" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "q1w2e3...",
///   "user": { "id": 1, "username": "alice", "email": "alice@example.com", "role": "ROLE_USER" }
/// }
/// ```
///
/// # Errors
///
/// - 400 on invalid fields
/// - 409 if the username or email is taken
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let session = state
        .auth_service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok(Json(session.into()))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 for an unknown username or a wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let session = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(session.into()))
}

/// Mails a password-reset link.
///
/// # Endpoint
///
/// `POST /api/auth/forgot-password`
///
/// # Errors
///
/// Returns 404 if no account uses the email.
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .auth_service
        .request_password_reset(&payload.email)
        .await?;

    Ok(Json(MessageResponse::new(
        "Password reset link sent successfully",
    )))
}

/// Sets a new password using a reset token.
///
/// # Endpoint
///
/// `POST /api/auth/reset-password`
///
/// # Request Body
///
/// ```json
/// { "token": "q1w2e3...", "newPassword": "n3w-s3cret" }
/// ```
///
/// # Errors
///
/// Returns 400 if the token is unknown or expired.
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .auth_service
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
