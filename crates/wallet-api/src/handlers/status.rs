//! Status handlers.

use axum::{extract::State, Json};

use wallet_models::{NodeStatus, UserStatus};

use crate::state::AppState;

/// GET /api/node_status - Chain height, mempool size and difficulty.
pub async fn node_status(State(state): State<AppState>) -> Json<NodeStatus> {
    Json(state.backend.node_status().await)
}

/// GET /api/user_status - Wallet key and balance.
pub async fn user_status(State(state): State<AppState>) -> Json<UserStatus> {
    Json(state.backend.user_status().await)
}
