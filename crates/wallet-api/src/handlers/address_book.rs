//! Address book handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use wallet_models::AddressBook;

use crate::error::Result;
use crate::state::AppState;
use crate::types::SavedResponse;

/// GET /api/address_book - The stored book, empty if none is stored.
pub async fn get_address_book(State(state): State<AppState>) -> Json<AddressBook> {
    Json(state.address_book.load_or_default())
}

/// POST /api/address_book - Replace the stored book.
pub async fn save_address_book(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddressBook>, JsonRejection>,
) -> Result<Json<SavedResponse>> {
    let Json(book) = payload?;
    state.address_book.save(&book)?;
    info!(entries = book.len(), "address book saved");

    Ok(Json(SavedResponse {
        entries: book.len(),
    }))
}
