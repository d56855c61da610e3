//! Server configuration.

use std::path::PathBuf;
use std::time::Instant;

/// Where the address book lives unless configured otherwise.
pub const DEFAULT_ADDRESS_BOOK_PATH: &str = "configs/AddressBook.json";

/// Listening address and storage location of the wallet API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to listen on.
    pub host: String,
    /// TCP port, 0 for any free port.
    pub port: u16,
    /// JSON file holding the address book.
    pub address_book_path: PathBuf,
    /// When the server was configured; uptime is measured from here.
    pub start_time: Instant,
}

impl ApiConfig {
    /// Listens on `host:port` with the default address book file.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            address_book_path: PathBuf::from(DEFAULT_ADDRESS_BOOK_PATH),
            start_time: Instant::now(),
        }
    }

    /// Stores the address book at `path`.
    pub fn with_address_book_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.address_book_path = path.into();
        self
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whole seconds since start.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for ApiConfig {
    /// Same port the wallet connects to by default.
    fn default() -> Self {
        Self::new("127.0.0.1", 8080)
    }
}
