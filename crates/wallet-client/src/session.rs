//! Session state: the address book and the transaction being assembled.
//!
//! A [`Session`] is shared (`Arc<Session>`) between user actions and the
//! background pollers. Its lock is only held for the duration of a single
//! state transition and never across an `.await`, so every step reads the
//! state as it is at that moment. Nothing is snapshotted at the start of an
//! operation: an edit made while a request is in flight is visible to the
//! statements that run after the request completes.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use wallet_models::{
    parse_amount, AddressBook, PendingRecipient, RecipientStaging, TransactionRequest,
};

use crate::api::NodeApi;
use crate::error::{ClientError, Result};
use crate::view::View;

/// Alert shown when an amount prompt does not contain a number.
pub const INVALID_AMOUNT_ALERT: &str = "That's not a valid number";

/// Alert shown when the fee field does not contain a number.
pub const INVALID_FEE_ALERT: &str = "That's not a valid fee";

#[derive(Debug, Default)]
struct SessionState {
    book: AddressBook,
    staging: RecipientStaging,
    fee_input: String,
    closed: bool,
}

/// Client session owning the local wallet page state.
pub struct Session {
    state: Mutex<SessionState>,
    api: Arc<dyn NodeApi>,
    view: Arc<dyn View>,
}

impl Session {
    /// Creates an empty session talking to `api` and drawing on `view`.
    pub fn new(api: Arc<dyn NodeApi>, view: Arc<dyn View>) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            api,
            view,
        }
    }

    /// The node this session synchronizes with.
    pub fn api(&self) -> &Arc<dyn NodeApi> {
        &self.api
    }

    /// The view this session draws on.
    pub fn view(&self) -> &Arc<dyn View> {
        &self.view
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_open(&self) -> Result<MutexGuard<'_, SessionState>> {
        let state = self.lock();
        if state.closed {
            return Err(ClientError::SessionClosed);
        }
        Ok(state)
    }

    /// Draws the whole page from current state.
    pub fn render_all(&self) {
        let state = self.lock();
        self.view.render_address_book(&state.book);
        self.view.render_recipients(&state.staging);
        self.view.render_fee(&state.fee_input);
    }

    // Address book -----------------------------------------------------------

    /// Adds an address book entry; rejected input raises an alert.
    pub fn add_address(&self, label: &str, address: &str) -> Result<()> {
        let mut state = self.lock_open()?;
        if let Err(e) = state.book.add(label, address) {
            debug!(label = %label.trim(), error = %e, "address rejected");
            self.view.alert(&e.to_string());
            return Err(e.into());
        }
        self.view.render_address_book(&state.book);
        Ok(())
    }

    /// Removes an entry if present and redraws the list.
    pub fn remove_address(&self, label: &str) -> Result<Option<String>> {
        let mut state = self.lock_open()?;
        let removed = state.book.remove(label);
        self.view.render_address_book(&state.book);
        Ok(removed)
    }

    /// Copy of the current address book.
    pub fn address_book(&self) -> AddressBook {
        self.lock().book.clone()
    }

    fn replace_address_book(&self, book: AddressBook) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        state.book = book;
        self.view.render_address_book(&state.book);
    }

    /// Loads the address book from the node, replacing the local one.
    ///
    /// Any failure resets the book to empty and is only logged.
    pub async fn load_address_book(&self) {
        info!("loading address book");
        let book = match self.api.fetch_address_book().await {
            Ok(book) => {
                debug!(entries = book.len(), "address book loaded");
                book
            }
            Err(e) => {
                warn!(error = %e, "failed to load address book");
                AddressBook::new()
            }
        };
        self.replace_address_book(book);
    }

    /// Sends the current address book to the node.
    ///
    /// Failures are logged and returned; local state is never rolled back.
    pub async fn save_address_book(&self) -> Result<()> {
        let book = self.address_book();
        match self.api.save_address_book(&book).await {
            Ok(()) => {
                info!(entries = book.len(), "address book saved");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to save address book");
                Err(e)
            }
        }
    }

    // Staged recipients ------------------------------------------------------

    /// Stages an output with an already parsed amount.
    pub fn stage(&self, label: &str, amount: i64) -> Result<()> {
        let mut state = self.lock_open()?;
        state.staging.append(label, amount);
        self.view.render_recipients(&state.staging);
        Ok(())
    }

    /// Parses the amount typed for `label` and stages it.
    ///
    /// A non-numeric amount raises an alert and changes nothing.
    pub fn stage_from_input(&self, label: &str, raw_amount: &str) -> Result<()> {
        if self.is_closed() {
            return Err(ClientError::SessionClosed);
        }
        let amount = match parse_amount(raw_amount) {
            Ok(amount) => amount,
            Err(e) => {
                self.view.alert(INVALID_AMOUNT_ALERT);
                return Err(e.into());
            }
        };
        self.stage(label, amount)
    }

    /// Removes the staged output at `index`.
    pub fn unstage(&self, index: usize) -> Result<PendingRecipient> {
        let mut state = self.lock_open()?;
        let removed = state.staging.remove_at(index)?;
        self.view.render_recipients(&state.staging);
        Ok(removed)
    }

    /// Copy of the staged outputs.
    pub fn staged(&self) -> RecipientStaging {
        self.lock().staging.clone()
    }

    /// Sets the fee field text.
    pub fn set_fee_input(&self, fee: &str) -> Result<()> {
        let mut state = self.lock_open()?;
        state.fee_input = fee.to_string();
        self.view.render_fee(&state.fee_input);
        Ok(())
    }

    /// Current fee field text.
    pub fn fee_input(&self) -> String {
        self.lock().fee_input.clone()
    }

    /// Parses the fee field; a non-numeric fee raises an alert.
    pub fn parse_fee_input(&self) -> Result<i64> {
        let raw = self.fee_input();
        parse_amount(&raw).map_err(|e| {
            self.view.alert(INVALID_FEE_ALERT);
            e.into()
        })
    }

    /// Resolves the staged outputs through the address book as they are now.
    pub fn resolve_transaction(&self, fee: i64) -> TransactionRequest {
        let state = self.lock();
        TransactionRequest::resolve(&state.staging, &state.book, fee)
    }

    /// Empties the staged outputs and the fee field.
    pub fn clear_transaction(&self) {
        let mut state = self.lock();
        state.staging.clear();
        state.fee_input.clear();
        self.view.render_recipients(&state.staging);
        self.view.render_fee(&state.fee_input);
    }

    // Shutdown ---------------------------------------------------------------

    /// Locks the session for good. Returns false if it was already closed.
    pub fn close(&self) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        state.closed = true;
        true
    }

    /// Whether the shutdown handshake has locked the session.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}
