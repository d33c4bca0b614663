//! Cross-cutting HTTP middleware: request timing/logging, security
//! headers, and CORS. The session/rate-limit/body-size middleware the
//! teacher carries has no counterpart here — the simulator has no
//! sessions and no reason to shed load.

use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};

/// Log every request's method, path, status, and duration.
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    let status = response.status();
    if status.is_success() {
        info!(%method, %uri, %status, duration_ms = %format!("{duration_ms:.2}"), "request completed");
    } else if status.is_client_error() {
        warn!(%method, %uri, %status, duration_ms = %format!("{duration_ms:.2}"), "client error");
    } else if status.is_server_error() {
        error!(%method, %uri, %status, duration_ms = %format!("{duration_ms:.2}"), "server error");
    }

    response
}

/// Baseline security headers on every response.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    response
}

/// Permissive CORS — the simulator impersonates vendor APIs consumed by
/// arbitrary downstream analytics tooling, not a browser app with an
/// origin allowlist to enforce.
pub fn cors_layer() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::permissive()
}
