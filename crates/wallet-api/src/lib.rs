//! Node-side JSON API for the wallet page.
//!
//! This crate serves the endpoints a wallet page talks to:
//! - Address book load/save (`/api/address_book`), persisted to a JSON file
//! - Node and user status (`/api/node_status`, `/api/user_status`)
//! - Transaction submission (`/api/transaction`)
//! - Shutdown handshake (`/api/save_check`)
//!
//! Chain state and signing live behind the `WalletBackend` trait;
//! `DevBackend` is an in-memory node for development and tests.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use wallet_api::{serve_with_shutdown, ApiConfig, AppState, DevBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let listener = TcpListener::bind(config.bind_address()).await?;
//!     let state = AppState::new(config, Arc::new(DevBackend::default()));
//!
//!     serve_with_shutdown(listener, state, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use backend::{DevBackend, OutputSpec, WalletBackend};
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve_with_shutdown};
pub use state::{AppState, ShutdownFlag};
