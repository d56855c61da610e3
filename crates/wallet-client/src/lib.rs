//! Wallet page controller.
//!
//! This crate keeps the state of a wallet page and synchronizes it with a
//! node over its JSON HTTP API:
//! - `Session` - address book, staged outputs and fee field, drawn through a `View`
//! - `TransactionSubmitter` - resolves staged outputs and submits them
//! - `StatusPoller` - refreshes node and user status on a timer
//! - `ShutdownWatcher` - saves the address book and locks the page when the node stops
//! - `WalletRuntime` - main entry point owning the session and its background tasks
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wallet_client::{ClientConfig, SharedDisplay, WalletRuntime};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let display = SharedDisplay::new();
//!     let config = ClientConfig::new("http://127.0.0.1:8080");
//!     let mut runtime = WalletRuntime::connect(config, Arc::new(display.clone()));
//!
//!     runtime.start()?;
//!
//!     let session = runtime.session();
//!     session.add_address("alice", "02ab...")?;
//!     session.stage_from_input("alice", "5")?;
//!     session.set_fee_input("1")?;
//!     runtime.submitter().submit_with_fee_input().await?;
//!
//!     runtime.wait_for_shutdown().await;
//!     runtime.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! User actions and the pollers share one `Session`. Its lock is held only
//! for a single state transition, never across a request, so requests see
//! the state as it is when each step runs. Nothing has a timeout and
//! nothing is retried.

pub mod api;
pub mod config;
pub mod error;
pub mod poller;
pub mod runtime;
pub mod session;
pub mod submitter;
pub mod view;
pub mod watcher;

#[cfg(test)]
mod testing;

pub use api::{HttpNodeClient, NodeApi, PendingBody};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use poller::{refresh_status, StatusPoller};
pub use runtime::WalletRuntime;
pub use session::Session;
pub use submitter::TransactionSubmitter;
pub use view::{DisplayState, SharedDisplay, Snapshot, View, SHUTDOWN_NOTICE};
pub use watcher::ShutdownWatcher;
