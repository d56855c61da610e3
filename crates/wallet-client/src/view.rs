//! Rendering seam between session state and whatever displays it.
//!
//! State transitions in [`crate::Session`] never draw anything themselves;
//! they call a [`View`] afterwards. [`SharedDisplay`] is an in-memory view
//! that records what a wallet page would currently show.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use wallet_models::{
    AddressBook, AddressBookEntry, NodeStatus, PendingRecipient, RecipientStaging,
    TransactionResponse, UserStatus,
};

/// Receives display updates from a wallet session.
///
/// Implementations must be cheap and non-blocking: they are called while
/// handlers run, sometimes from background polling tasks.
pub trait View: Send + Sync {
    /// Redraw the address list.
    fn render_address_book(&self, book: &AddressBook);

    /// Redraw the staged outputs. An empty list collapses the region.
    fn render_recipients(&self, staging: &RecipientStaging);

    /// Redraw the fee field.
    fn render_fee(&self, fee: &str);

    /// Show fresh node status.
    fn show_node_status(&self, status: &NodeStatus);

    /// Show fresh user status.
    fn show_user_status(&self, status: &UserStatus);

    /// Show the outcome of a transaction, styled by `success`.
    fn show_transaction_result(&self, response: &TransactionResponse);

    /// Alert-style message for rejected user input.
    fn alert(&self, message: &str);

    /// Replace everything with the terminal shutdown notice.
    fn show_shutdown_notice(&self);
}

/// Text of the terminal shutdown notice.
pub const SHUTDOWN_NOTICE: &str = "Server has shut down. Please close this tab.";

/// A displayed value and when it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// The displayed value.
    pub value: T,
    /// When the display was updated.
    pub received_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    fn now(value: T) -> Self {
        Self {
            value,
            received_at: Utc::now(),
        }
    }
}

/// What the wallet page is currently showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    /// Address list rows.
    pub address_list: Vec<AddressBookEntry>,
    /// Staged output rows, `None` while the region is collapsed.
    pub recipients: Option<Vec<PendingRecipient>>,
    /// Fee field contents.
    pub fee: String,
    /// Last node status shown.
    pub node_status: Option<Snapshot<NodeStatus>>,
    /// Last user status shown.
    pub user_status: Option<Snapshot<UserStatus>>,
    /// Transaction result region.
    pub message: Option<TransactionResponse>,
    /// Alerts raised so far, oldest first.
    pub alerts: Vec<String>,
    /// Whether the shutdown notice replaced the page.
    pub shutdown: bool,
    /// Number of address list redraws.
    pub address_book_renders: usize,
    /// Number of staged output redraws.
    pub recipient_renders: usize,
}

/// Thread-safe [`View`] that keeps a [`DisplayState`].
///
/// Once the shutdown notice is shown the page is gone: later updates are
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct SharedDisplay {
    state: Arc<Mutex<DisplayState>>,
}

impl SharedDisplay {
    /// Creates an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current display.
    pub fn snapshot(&self) -> DisplayState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, DisplayState> {
        // A panicked writer leaves plain data behind; keep showing it
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn update(&self, f: impl FnOnce(&mut DisplayState)) {
        let mut state = self.lock();
        if !state.shutdown {
            f(&mut state);
        }
    }
}

impl View for SharedDisplay {
    fn render_address_book(&self, book: &AddressBook) {
        self.update(|s| {
            s.address_list = book.iter().cloned().collect();
            s.address_book_renders += 1;
        });
    }

    fn render_recipients(&self, staging: &RecipientStaging) {
        self.update(|s| {
            s.recipients = if staging.is_collapsed() {
                None
            } else {
                Some(staging.iter().cloned().collect())
            };
            s.recipient_renders += 1;
        });
    }

    fn render_fee(&self, fee: &str) {
        self.update(|s| s.fee = fee.to_string());
    }

    fn show_node_status(&self, status: &NodeStatus) {
        self.update(|s| s.node_status = Some(Snapshot::now(*status)));
    }

    fn show_user_status(&self, status: &UserStatus) {
        self.update(|s| s.user_status = Some(Snapshot::now(status.clone())));
    }

    fn show_transaction_result(&self, response: &TransactionResponse) {
        self.update(|s| s.message = Some(response.clone()));
    }

    fn alert(&self, message: &str) {
        self.update(|s| s.alerts.push(message.to_string()));
    }

    fn show_shutdown_notice(&self) {
        let mut state = self.lock();
        *state = DisplayState {
            shutdown: true,
            ..DisplayState::default()
        };
    }
}
