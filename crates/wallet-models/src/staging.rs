//! Recipients staged for the next transaction.

use crate::error::{ModelError, Result};

/// One output waiting to be submitted.
///
/// The label is resolved against the address book only at submission time;
/// staging does not check that it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecipient {
    /// Address book label of the recipient.
    pub label: String,
    /// Amount to send. Negative values are staged as typed.
    pub amount: i64,
}

/// Ordered list of pending outputs.
///
/// The same label may appear several times (multiple outputs to one party).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientStaging {
    recipients: Vec<PendingRecipient>,
}

impl RecipientStaging {
    /// Creates an empty staging list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an output to the end of the list.
    pub fn append(&mut self, label: impl Into<String>, amount: i64) {
        self.recipients.push(PendingRecipient {
            label: label.into(),
            amount,
        });
    }

    /// Removes the output at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<PendingRecipient> {
        if index >= self.recipients.len() {
            return Err(ModelError::IndexOutOfRange {
                index,
                len: self.recipients.len(),
            });
        }
        Ok(self.recipients.remove(index))
    }

    /// Drops every staged output.
    pub fn clear(&mut self) {
        self.recipients.clear();
    }

    /// Iterates outputs in staging order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingRecipient> {
        self.recipients.iter()
    }

    /// Number of staged outputs.
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Returns true if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    /// Whether the recipient region should be collapsed instead of drawn.
    pub fn is_collapsed(&self) -> bool {
        self.is_empty()
    }
}
