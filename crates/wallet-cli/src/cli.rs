//! Command-line interface definition using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use wallet_api::config::DEFAULT_ADDRESS_BOOK_PATH;
use wallet_api::ApiConfig;
use wallet_client::config::{DEFAULT_NODE_URL, NODE_URL_ENV};
use wallet_client::ClientConfig;

/// Wallet - terminal wallet page and development node
#[derive(Parser, Debug)]
#[command(name = "wallet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the wallet against a running node
    Repl {
        /// Base URL of the node API
        #[arg(long, env = NODE_URL_ENV, default_value = DEFAULT_NODE_URL)]
        node_url: String,

        /// Status refresh period in milliseconds
        #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
        status_interval_ms: u64,

        /// Save-check period in milliseconds
        #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
        save_check_interval_ms: u64,
    },

    /// Run a development node serving the wallet API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8080)]
        port: u16,

        /// Address book file
        #[arg(long, env = "WALLET_BOOK_PATH", default_value = DEFAULT_ADDRESS_BOOK_PATH)]
        book: String,

        /// Starting wallet balance
        #[arg(long, default_value_t = 1000)]
        balance: u64,

        /// Mine a block every N seconds (never if omitted)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        block_interval_secs: Option<u64>,

        /// How long wallets get to save after Ctrl-C, in milliseconds
        #[arg(long, default_value_t = 3000)]
        grace_ms: u64,
    },
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Builds the wallet configuration from `repl` arguments.
pub fn client_config(node_url: &str, status_interval_ms: u64, save_check_interval_ms: u64) -> ClientConfig {
    ClientConfig::new(node_url)
        .with_status_interval(Duration::from_millis(status_interval_ms))
        .with_save_check_interval(Duration::from_millis(save_check_interval_ms))
}

/// Builds the API configuration from `serve` arguments.
///
/// `~` in the book path is expanded.
pub fn api_config(host: &str, port: u16, book: &str) -> ApiConfig {
    let book = PathBuf::from(shellexpand::tilde(book).to_string());
    ApiConfig::new(host, port).with_address_book_path(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_repl_defaults() {
        let cli = Cli::parse_from(["wallet", "repl"]);
        match cli.command {
            Commands::Repl {
                status_interval_ms,
                save_check_interval_ms,
                ..
            } => {
                assert_eq!(status_interval_ms, 2000);
                assert_eq!(save_check_interval_ms, 2000);
            }
            _ => panic!("Expected Repl command"),
        }
    }

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from([
            "wallet",
            "serve",
            "--port",
            "9000",
            "--balance",
            "50",
            "--block-interval-secs",
            "10",
        ]);
        match cli.command {
            Commands::Serve {
                port,
                balance,
                block_interval_secs,
                grace_ms,
                ..
            } => {
                assert_eq!(port, 9000);
                assert_eq!(balance, 50);
                assert_eq!(block_interval_secs, Some(10));
                assert_eq!(grace_ms, 3000);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_periods() {
        for args in [
            ["wallet", "repl", "--status-interval-ms", "0"],
            ["wallet", "repl", "--save-check-interval-ms", "0"],
            ["wallet", "serve", "--block-interval-secs", "0"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "accepted {:?}", args);
        }
        assert!(Cli::try_parse_from(["wallet", "repl", "--save-check-interval-ms", "1"]).is_ok());
    }

    #[test]
    fn test_client_config_raises_zero_interval() {
        let config = client_config("http://node:1", 0, 0);
        assert_eq!(config.status_interval, wallet_client::config::MIN_POLL_INTERVAL);
        assert_eq!(config.save_check_interval, wallet_client::config::MIN_POLL_INTERVAL);
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["wallet", "-vv", "repl"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_client_config_from_args() {
        let config = client_config("http://node:1", 500, 750);
        assert_eq!(config.node_url, "http://node:1");
        assert_eq!(config.status_interval, Duration::from_millis(500));
        assert_eq!(config.save_check_interval, Duration::from_millis(750));
    }

    #[test]
    fn test_api_config_from_args() {
        let config = api_config("0.0.0.0", 9000, "/tmp/book.json");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.address_book_path, PathBuf::from("/tmp/book.json"));
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
