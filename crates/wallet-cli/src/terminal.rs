//! Terminal rendering of a wallet session.

use std::io::{self, Write};
use std::sync::Mutex;

use wallet_client::{DisplayState, SharedDisplay, View, SHUTDOWN_NOTICE};
use wallet_models::{
    AddressBook, NodeStatus, RecipientStaging, TransactionResponse, UserStatus,
};

/// [`View`] for a line-oriented terminal.
///
/// Page state is kept in a [`SharedDisplay`] and printed on demand by the
/// REPL. Only events a user must notice right away are written through:
/// alerts, transaction results and the shutdown notice.
pub struct TerminalView<W: Write + Send = io::Stdout> {
    display: SharedDisplay,
    out: Mutex<W>,
}

impl TerminalView<io::Stdout> {
    /// Creates a view printing to stdout.
    pub fn stdout(display: SharedDisplay) -> Self {
        Self::new(display, io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    /// Creates a view printing to `out`.
    pub fn new(display: SharedDisplay, out: W) -> Self {
        Self {
            display,
            out: Mutex::new(out),
        }
    }

    /// The page state behind this view.
    pub fn display(&self) -> &SharedDisplay {
        &self.display
    }

    fn print(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        // Nothing sensible to do if the terminal is gone
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> View for TerminalView<W> {
    fn render_address_book(&self, book: &AddressBook) {
        self.display.render_address_book(book);
    }

    fn render_recipients(&self, staging: &RecipientStaging) {
        self.display.render_recipients(staging);
    }

    fn render_fee(&self, fee: &str) {
        self.display.render_fee(fee);
    }

    fn show_node_status(&self, status: &NodeStatus) {
        self.display.show_node_status(status);
    }

    fn show_user_status(&self, status: &UserStatus) {
        self.display.show_user_status(status);
    }

    fn show_transaction_result(&self, response: &TransactionResponse) {
        if self.display.snapshot().shutdown {
            return;
        }
        self.display.show_transaction_result(response);
        self.print(&format_transaction_result(response));
    }

    fn alert(&self, message: &str) {
        if self.display.snapshot().shutdown {
            return;
        }
        self.display.alert(message);
        self.print(&format!("! {}", message));
    }

    fn show_shutdown_notice(&self) {
        self.display.show_shutdown_notice();
        self.print("");
        self.print(SHUTDOWN_NOTICE);
    }
}

/// One line describing a transaction outcome.
pub fn format_transaction_result(response: &TransactionResponse) -> String {
    if response.success {
        format!("[accepted] {}", response.message)
    } else {
        format!("[rejected] {}", response.message)
    }
}

/// The address list, one `label  address` row per entry.
pub fn format_address_book(state: &DisplayState) -> String {
    if state.address_list.is_empty() {
        return "Address book is empty. Use /add <label> <address>.".to_string();
    }

    let width = state
        .address_list
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);

    state
        .address_list
        .iter()
        .map(|e| format!("  {:<width$}  {}", e.label, e.address, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Staged outputs numbered from 1, plus the fee field.
pub fn format_staged(state: &DisplayState) -> String {
    let mut lines = match &state.recipients {
        None => vec!["Nothing staged. Use /send <label>.".to_string()],
        Some(recipients) => recipients
            .iter()
            .enumerate()
            .map(|(i, r)| format!("  {}. {} <- {}", i + 1, r.label, r.amount))
            .collect(),
    };

    if !state.fee.is_empty() {
        lines.push(format!("  fee: {}", state.fee));
    }

    lines.join("\n")
}

/// Last known node and user status with their age.
pub fn format_status(state: &DisplayState) -> String {
    let node = match &state.node_status {
        Some(s) => format!(
            "Node: height {}, mempool {}, difficulty {} (as of {})",
            s.value.height,
            s.value.mempool_size,
            s.value.difficulty,
            s.received_at.format("%H:%M:%S")
        ),
        None => "Node: unknown".to_string(),
    };
    let user = match &state.user_status {
        Some(s) => format!(
            "Wallet: {} owns {} (as of {})",
            s.value.pk,
            s.value.amount,
            s.received_at.format("%H:%M:%S")
        ),
        None => "Wallet: unknown".to_string(),
    };

    format!("{}\n{}", node, user)
}
