//! Liveness endpoint

use axum::Json;

use crate::dto::HealthResponse;

/// GET /health - Report that the optimizer backend is up, with its version
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
