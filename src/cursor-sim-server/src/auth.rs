//! Authentication: a single static credential check, accepted as either
//! a bearer or basic header value. Any non-empty presented credential
//! is accepted when no static credential is configured.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

fn presented_credential(request: &Request) -> Option<&str> {
    let header = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .or_else(|| header.strip_prefix("Basic "))
        .or_else(|| header.strip_prefix("basic "))
}

/// Require a credential on every request. When no static credential is
/// configured (development default), any non-empty presented
/// credential is accepted; when one is configured, it must match
/// exactly.
pub async fn require_credential(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state.config.auth.static_credential.as_deref();
    let presented = presented_credential(&request);

    let authorized = match (expected, presented) {
        (_, None) => false,
        (None, Some(token)) => !token.is_empty(),
        (Some(expected), Some(token)) => token == expected,
    };

    if !authorized {
        return Err(AppError::Unauthorized("missing or rejected credential".to_string()));
    }

    Ok(next.run(request).await)
}
