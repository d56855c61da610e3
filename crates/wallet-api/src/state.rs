//! Application state shared across handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;
use wallet_persistence::AddressBookStore;

use crate::backend::WalletBackend;
use crate::config::ApiConfig;

/// Flag answered by `/api/save_check`.
///
/// Once raised it stays raised; clients polling the endpoint save their
/// address book and lock.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    /// Creates a lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks connected wallets to save and stop.
    pub fn request_save(&self) {
        if !self.0.swap(true, Ordering::SeqCst) {
            info!("save requested from connected wallets");
        }
    }

    /// Whether a save has been requested.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// The node behind the API.
    pub backend: Arc<dyn WalletBackend>,
    /// Address book file.
    pub address_book: Arc<AddressBookStore>,
    /// Shutdown handshake flag.
    pub shutdown: ShutdownFlag,
}

impl AppState {
    /// Creates state storing the address book at `config.address_book_path`.
    pub fn new(config: ApiConfig, backend: Arc<dyn WalletBackend>) -> Self {
        let address_book = AddressBookStore::new(config.address_book_path.clone());
        Self {
            config: Arc::new(config),
            backend,
            address_book: Arc::new(address_book),
            shutdown: ShutdownFlag::new(),
        }
    }

    /// Uses an externally owned shutdown flag.
    pub fn with_shutdown_flag(mut self, flag: ShutdownFlag) -> Self {
        self.shutdown = flag;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag_is_shared_and_sticky() {
        let flag = ShutdownFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_raised());

        flag.request_save();
        flag.request_save();
        assert!(clone.is_raised());
    }
}
