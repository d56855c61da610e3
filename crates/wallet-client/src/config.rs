//! Client configuration.

use std::time::Duration;

/// Environment variable holding the node base URL.
pub const NODE_URL_ENV: &str = "WALLET_NODE_URL";

/// Default node base URL.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:8080";

/// Shortest poll period; a zero period is raised to this.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for a wallet session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the node API (scheme, host and port).
    pub node_url: String,
    /// How often node and user status are refreshed.
    pub status_interval: Duration,
    /// How often the node is asked whether it is shutting down.
    pub save_check_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            status_interval: Duration::from_secs(2),
            save_check_interval: Duration::from_secs(2),
        }
    }
}

impl ClientConfig {
    /// Creates a config for the given node with default intervals.
    pub fn new(node_url: impl Into<String>) -> Self {
        Self {
            node_url: node_url.into(),
            ..Self::default()
        }
    }

    /// Sets the status refresh interval, no shorter than [`MIN_POLL_INTERVAL`].
    pub fn with_status_interval(mut self, interval: Duration) -> Self {
        self.status_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Sets the save-check interval, no shorter than [`MIN_POLL_INTERVAL`].
    pub fn with_save_check_interval(mut self, interval: Duration) -> Self {
        self.save_check_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Full URL for an API path such as `/api/node_status`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.node_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
