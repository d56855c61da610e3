//! CLI error types.

use thiserror::Error;

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Terminal line editor failure.
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// IO error (runtime setup, socket bind).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Wallet session error.
    #[error("wallet error: {0}")]
    Client(#[from] wallet_client::ClientError),
}
