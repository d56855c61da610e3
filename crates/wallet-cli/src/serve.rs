//! Development node: the wallet API over an in-memory backend.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use wallet_api::{serve_with_shutdown, ApiConfig, AppState, DevBackend, ShutdownFlag};

use crate::error::Result;

/// Options of the `serve` command.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Server configuration.
    pub api: ApiConfig,
    /// Starting wallet balance.
    pub balance: u64,
    /// Block period; `None` never mines.
    pub block_interval: Option<Duration>,
    /// Time wallets get to save once shutdown is requested.
    pub grace: Duration,
}

/// Runs the development node until Ctrl-C.
pub async fn run(options: ServeOptions) -> Result<()> {
    let backend = Arc::new(DevBackend::new(options.balance));
    let flag = ShutdownFlag::new();
    let state = AppState::new(options.api.clone(), backend.clone()).with_shutdown_flag(flag.clone());

    info!(
        book = %options.api.address_book_path.display(),
        balance = options.balance,
        "starting development node"
    );

    if let Some(period) = options.block_interval {
        tokio::spawn(mine_blocks(backend, period));
    }

    let listener = TcpListener::bind(options.api.bind_address()).await?;
    println!("Wallet API listening on http://{}", options.api.bind_address());

    let signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "unable to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    serve_with_shutdown(listener, state, save_then_stop(signal, flag, options.grace)).await?;

    info!("development node stopped");
    Ok(())
}

/// Waits for `signal`, asks wallets to save, then lets them poll for `grace`.
pub async fn save_then_stop<F>(signal: F, flag: ShutdownFlag, grace: Duration)
where
    F: Future<Output = ()>,
{
    signal.await;
    flag.request_save();
    info!(grace_ms = grace.as_millis() as u64, "waiting for wallets to save");
    tokio::time::sleep(grace).await;
}

async fn mine_blocks(backend: Arc<DevBackend>, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick is immediate; start from height 0
    ticker.tick().await;

    loop {
        ticker.tick().await;
        backend.mine_block();
    }
}
