//! Transaction request and response bodies.

use serde::{Deserialize, Serialize};

use crate::address_book::AddressBook;
use crate::staging::RecipientStaging;

/// Body of `POST /api/transaction`.
///
/// Each recipient is an `[address, amount]` pair. An address is `None`
/// (JSON `null`) when its label was no longer in the address book at the
/// moment of resolution; the request is still sent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Resolved outputs in staging order.
    pub recipients: Vec<(Option<String>, i64)>,
    /// Fee offered to the miner.
    pub fee: i64,
}

impl TransactionRequest {
    /// Resolves every staged label through the address book.
    pub fn resolve(staging: &RecipientStaging, book: &AddressBook, fee: i64) -> Self {
        let recipients = staging
            .iter()
            .map(|r| (book.get(&r.label).map(str::to_string), r.amount))
            .collect();

        Self { recipients, fee }
    }

    /// Sum of all output amounts plus the fee, saturating at the `i64` bounds.
    pub fn total_spend(&self) -> i64 {
        self.recipients
            .iter()
            .fold(self.fee, |acc, (_, amount)| acc.saturating_add(*amount))
    }

    /// Number of outputs whose label did not resolve.
    pub fn unresolved_count(&self) -> usize {
        self.recipients.iter().filter(|(a, _)| a.is_none()).count()
    }
}

/// Body returned by `POST /api/transaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Whether the node accepted the transaction.
    pub success: bool,
    /// Human readable outcome.
    pub message: String,
}

impl TransactionResponse {
    /// An accepted transaction.
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A rejected transaction.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
