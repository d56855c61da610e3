//! Error types for wallet state transitions.

use thiserror::Error;

/// Errors raised by local state transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A required field was empty after trimming.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The label is already present in the address book.
    #[error("duplicate label: {0}")]
    DuplicateLabel(String),

    /// The user-supplied amount is not an integer.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Staged recipient index does not exist.
    #[error("index {index} out of range for {len} staged recipients")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of staged recipients at the time of the call.
        len: usize,
    },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ModelError::DuplicateLabel("alice".into()).to_string(),
            "duplicate label: alice"
        );
        assert_eq!(
            ModelError::InvalidAmount("abc".into()).to_string(),
            "invalid amount: \"abc\""
        );
        assert_eq!(
            ModelError::IndexOutOfRange { index: 3, len: 1 }.to_string(),
            "index 3 out of range for 1 staged recipients"
        );
    }
}
