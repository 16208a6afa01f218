use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - status plus pending restart, if any
pub async fn health(State(state): State<AppState>) -> Response {
    let scheduler = state.scheduler();

    let health = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "restart": {
            "pending": scheduler.is_pending(),
            "delayMs": scheduler.pending_delay_ms(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe; not ready once a restart is armed
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.scheduler().is_pending() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Restarting").into_response();
    }
    (StatusCode::OK, "Ready").into_response()
}
