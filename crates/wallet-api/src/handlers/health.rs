//! Health check handler.

use axum::{extract::State, Json};

use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /api/health - Liveness, version and shutdown state.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let save_requested = state.shutdown.is_raised();
    let status = if save_requested { "shutting_down" } else { "ok" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.config.uptime_seconds(),
        save_requested,
    })
}
