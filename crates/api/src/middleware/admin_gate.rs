//! Bearer-token gate for the admin surface.
//!
//! With `ADMIN_API_TOKEN` unset the gate is open; authentication is then
//! expected to happen in front of the service.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
    })?;

    if token != expected {
        tracing::warn!(path = %request.uri().path(), "Rejected admin request with bad token");
        return Err(AppError::Unauthorized("Invalid admin token".into()));
    }

    Ok(next.run(request).await)
}
