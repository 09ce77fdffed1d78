use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    readings: usize,
    locations: usize,
}

/// GET /health - Health check endpoint
///
/// Reports the size of the loaded dataset alongside the status
#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health"
))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Health check endpoint accessed");

    Json(HealthResponse {
        status: "ok".to_string(),
        readings: state.dataset.len(),
        locations: state.dataset.location_count(),
    })
}

/// GET /health/ready - Readiness probe for Kubernetes
///
/// Returns 200 once the dataset holds readings to serve
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.dataset.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /health/live - Liveness probe for Kubernetes
///
/// Returns 200 if the application is running
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
