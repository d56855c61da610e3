//! Response bodies not shared with the wallet models.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Whether wallets have been asked to save and stop.
    pub save_requested: bool,
}

/// Answer to an address book save. Wallets ignore it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResponse {
    /// Number of entries written.
    pub entries: usize,
}
