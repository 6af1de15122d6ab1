//! Bearer-token gate for the mutating routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::routes::AppState;

/// Reject the request unless it carries `Authorization: Bearer <token>`
/// with the configured token. Runs before the body is read.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request.headers().get(header::AUTHORIZATION);
    if let Err(err) = check_bearer(header, &state.token) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = %err,
            "Rejected request"
        );
        return Err(err);
    }
    Ok(next.run(request).await)
}

/// Missing or malformed header is a missing credential; a well-formed
/// header with the wrong token is an invalid token.
pub fn check_bearer(header: Option<&HeaderValue>, expected: &str) -> Result<(), ApiError> {
    let token = header
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::MissingCredential)?;

    if token != expected {
        return Err(ApiError::InvalidToken);
    }
    Ok(())
}
