//! Node backend seam and the in-memory development node.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

use wallet_models::{NodeStatus, TransactionResponse, UserStatus};

/// Public key reported by the development node.
pub const DEV_PUBLIC_KEY: &str =
    "02a1633cafcc01ebfb6d78e39f687a1f0995c62fc95f51ead10a02ee0be551b5dc";

/// Difficulty reported by the development node.
pub const DEV_DIFFICULTY: u64 = 4;

/// One decoded transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    /// Amount paid to the recipient.
    pub value: u64,
    /// Raw recipient address.
    pub recipient: Vec<u8>,
}

impl OutputSpec {
    /// Decodes a hex address into an output.
    pub fn from_hex(address: &str, value: u64) -> std::result::Result<Self, hex::FromHexError> {
        Ok(Self {
            value,
            recipient: hex::decode(address)?,
        })
    }
}

/// The node the API fronts.
///
/// Requests reaching `submit` have already been checked for shape and
/// balance; the backend decides whether the transaction is accepted.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    /// Current chain status.
    async fn node_status(&self) -> NodeStatus;

    /// Wallet owner status.
    async fn user_status(&self) -> UserStatus;

    /// Builds, signs and broadcasts a transaction.
    async fn submit(&self, outputs: Vec<OutputSpec>, fee: u64) -> TransactionResponse;
}

#[derive(Debug)]
struct DevChain {
    height: u64,
    mempool: Vec<(Vec<OutputSpec>, u64)>,
    balance: u64,
}

/// In-memory node for development and tests.
///
/// Accepted transactions wait in the mempool until [`DevBackend::mine_block`]
/// is called; the balance is debited on acceptance.
#[derive(Debug)]
pub struct DevBackend {
    chain: Mutex<DevChain>,
}

impl DevBackend {
    /// Creates a node whose wallet owns `balance`.
    pub fn new(balance: u64) -> Self {
        Self {
            chain: Mutex::new(DevChain {
                height: 0,
                mempool: Vec::new(),
                balance,
            }),
        }
    }

    /// Includes every mempool transaction in a new block.
    ///
    /// Returns the new height.
    pub fn mine_block(&self) -> u64 {
        let mut chain = self.lock();
        let included = chain.mempool.len();
        chain.mempool.clear();
        chain.height += 1;
        debug!(height = chain.height, included, "mined block");
        chain.height
    }

    /// Spendable balance.
    pub fn balance(&self) -> u64 {
        self.lock().balance
    }

    /// Outputs and fee of every transaction waiting in the mempool.
    pub fn mempool(&self) -> Vec<(Vec<OutputSpec>, u64)> {
        self.lock().mempool.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DevChain> {
        // A poisoned lock still holds consistent chain data
        self.chain.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new(1_000)
    }
}

#[async_trait]
impl WalletBackend for DevBackend {
    async fn node_status(&self) -> NodeStatus {
        let chain = self.lock();
        NodeStatus {
            height: chain.height,
            mempool_size: chain.mempool.len() as u64,
            difficulty: DEV_DIFFICULTY,
        }
    }

    async fn user_status(&self) -> UserStatus {
        UserStatus {
            pk: DEV_PUBLIC_KEY.to_string(),
            amount: self.balance(),
        }
    }

    async fn submit(&self, outputs: Vec<OutputSpec>, fee: u64) -> TransactionResponse {
        let total = outputs
            .iter()
            .fold(fee, |acc, o| acc.saturating_add(o.value));

        let mut chain = self.lock();
        if total > chain.balance {
            return TransactionResponse::rejected(format!(
                "insufficient funds: need {}, have {}",
                total, chain.balance
            ));
        }

        chain.balance -= total;
        chain.mempool.push((outputs, fee));
        info!(total, mempool_size = chain.mempool.len(), "transaction added to mempool");

        TransactionResponse::accepted("transaction added to mempool")
    }
}
