//! Error types for the client crate.

use thiserror::Error;
use wallet_models::ModelError;

/// Errors that can occur in a wallet session.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local state transition was rejected.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Request could not be sent or its body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// Node answered with a body that is not the expected JSON.
    #[error("protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    /// Session was locked by the shutdown handshake.
    #[error("session closed: node has shut down")]
    SessionClosed,

    /// Runtime already started.
    #[error("runtime already started")]
    AlreadyStarted,

    /// Runtime not started.
    #[error("runtime not started")]
    NotStarted,

    /// Shutdown error.
    #[error("shutdown error: {0}")]
    Shutdown(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
