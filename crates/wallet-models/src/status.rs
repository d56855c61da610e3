//! Read-only node snapshots polled by the wallet page.

use serde::{Deserialize, Serialize};

/// Chain and mempool status of the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    /// Current chain height.
    pub height: u64,
    /// Number of transactions waiting in the mempool.
    pub mempool_size: u64,
    /// Current mining difficulty.
    pub difficulty: u64,
}

/// Wallet owner status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    /// Hex-encoded public key.
    pub pk: String,
    /// Spendable balance.
    pub amount: u64,
}

/// Answer of the save-check endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveCheck {
    /// True once the node is shutting down and wants the address book saved.
    pub save: bool,
}
