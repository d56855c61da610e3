//! Shutdown handshake handler.

use axum::{extract::State, Json};

use wallet_models::SaveCheck;

use crate::state::AppState;

/// GET /api/save_check - Whether wallets should save and stop.
pub async fn save_check(State(state): State<AppState>) -> Json<SaveCheck> {
    Json(SaveCheck {
        save: state.shutdown.is_raised(),
    })
}
