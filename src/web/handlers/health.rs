//! # Health Check Handlers

use axum::Json;

use crate::web::response_types::HealthResponse;

/// Basic health check endpoint: GET /health
///
/// Returns OK while the process is serving requests; it does not probe the
/// engine, the catalog or the queues.
pub async fn basic_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
