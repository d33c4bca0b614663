//! Liveness probe.

use axum::Json;

use crate::api::types::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
