//! Health check endpoints.

use std::time::Instant;

use axum::{extract::State, routing::get, Json, Router};

use crate::dto::HealthResponse;
use crate::state::AppState;

/// Start time for uptime calculation.
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize the start time.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        verification_enabled: state.verify,
    })
}

/// Kubernetes readiness probe.
///
/// The service holds no connections or caches, so it is ready as soon as
/// it is serving.
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Service is ready")
    ),
    tag = "Health"
)]
pub async fn readiness_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Kubernetes liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = "Health"
)]
pub async fn liveness_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}
