//! Main wallet session runtime.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{HttpNodeClient, NodeApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::poller::StatusPoller;
use crate::session::Session;
use crate::submitter::TransactionSubmitter;
use crate::view::View;
use crate::watcher::ShutdownWatcher;

/// Owns a wallet session and its background tasks.
pub struct WalletRuntime {
    /// Shared session state.
    session: Arc<Session>,
    /// Poll intervals.
    config: ClientConfig,
    /// Stop signal sender, shared with the shutdown watcher.
    stop_tx: Arc<watch::Sender<bool>>,
    /// Handles of the spawned tasks.
    tasks: Vec<JoinHandle<()>>,
    /// Whether the runtime has been started.
    started: bool,
}

impl WalletRuntime {
    /// Creates a runtime over an arbitrary node implementation.
    pub fn new(config: ClientConfig, api: Arc<dyn NodeApi>, view: Arc<dyn View>) -> Self {
        let (stop_tx, _) = watch::channel(false);

        Self {
            session: Arc::new(Session::new(api, view)),
            config,
            stop_tx: Arc::new(stop_tx),
            tasks: Vec::new(),
            started: false,
        }
    }

    /// Creates a runtime talking HTTP to `config.node_url`.
    pub fn connect(config: ClientConfig, view: Arc<dyn View>) -> Self {
        let api = Arc::new(HttpNodeClient::new(config.clone()));
        Self::new(config, api, view)
    }

    /// Draws the empty page, then starts loading the address book and both
    /// pollers in the background.
    ///
    /// The address book load does not hold up the pollers; if it fails the
    /// book stays empty. Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns `AlreadyStarted` if the background tasks are running.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(ClientError::AlreadyStarted);
        }

        info!(node = %self.config.node_url, "starting wallet session");

        self.session.render_all();

        let session = Arc::clone(&self.session);
        self.tasks.push(tokio::spawn(async move {
            session.load_address_book().await;
        }));

        let mut poller = StatusPoller::new(
            Arc::clone(&self.session),
            self.config.status_interval,
            self.stop_tx.subscribe(),
        );
        self.tasks.push(tokio::spawn(async move {
            poller.run().await;
        }));

        let mut watcher = ShutdownWatcher::new(
            Arc::clone(&self.session),
            self.config.save_check_interval,
            Arc::clone(&self.stop_tx),
        );
        self.tasks.push(tokio::spawn(async move {
            watcher.run().await;
        }));

        self.started = true;
        debug!("wallet session started");

        Ok(())
    }

    /// Stops the background tasks.
    ///
    /// Raises the stop signal and waits for every background task.
    /// The session itself stays usable (it is only locked by the node's
    /// shutdown handshake).
    ///
    /// # Errors
    /// Returns `NotStarted` if [`WalletRuntime::start`] was not called, and
    /// `Shutdown` if a background task panicked.
    pub async fn shutdown(&mut self) -> Result<()> {
        if !self.started {
            return Err(ClientError::NotStarted);
        }

        info!("stopping wallet session");
        self.stop_tx.send_replace(true);

        for handle in self.tasks.drain(..) {
            handle
                .await
                .map_err(|e| ClientError::Shutdown(format!("task panicked: {}", e)))?;
        }

        self.started = false;
        info!("wallet session stopped");

        Ok(())
    }

    /// Resolves once the stop signal is raised, by the node's shutdown
    /// handshake or by [`WalletRuntime::shutdown`].
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.stop_tx.subscribe();
        // The sender lives in self, so the channel cannot close here
        let _ = rx.wait_for(|stop| *stop).await;
    }

    /// The shared session.
    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    /// A submitter bound to this session.
    pub fn submitter(&self) -> TransactionSubmitter {
        TransactionSubmitter::new(Arc::clone(&self.session))
    }

    /// The configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check if the runtime has been started.
    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl Drop for WalletRuntime {
    fn drop(&mut self) {
        if self.started {
            self.stop_tx.send_replace(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockNode;
    use crate::view::SharedDisplay;
    use std::time::Duration;

    fn make_runtime() -> (Arc<MockNode>, SharedDisplay, WalletRuntime) {
        let node = Arc::new(MockNode::new());
        let display = SharedDisplay::new();
        let config = ClientConfig::default();
        let runtime = WalletRuntime::new(config, node.clone(), Arc::new(display.clone()));
        (node, display, runtime)
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_loads_book_and_polls() {
        let (node, display, mut runtime) = make_runtime();
        node.set_address_book_body(Some(r#"{"alice":"addr1"}"#));

        runtime.start().unwrap();
        assert!(runtime.is_started());

        tokio::time::sleep(Duration::from_millis(10)).await;

        let state = display.snapshot();
        assert_eq!(state.address_list.len(), 1);
        assert!(state.node_status.is_some());
        assert!(state.recipients.is_none());
        assert_eq!(node.save_check_count(), 1);

        runtime.shutdown().await.unwrap();
        assert!(!runtime.is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_failure_does_not_block_polling() {
        let (node, display, mut runtime) = make_runtime();
        node.set_address_book_body(None);

        runtime.start().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let state = display.snapshot();
        assert!(state.address_list.is_empty());
        assert!(state.node_status.is_some());

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start() {
        let (_node, _display, mut runtime) = make_runtime();

        runtime.start().unwrap();
        assert!(matches!(runtime.start(), Err(ClientError::AlreadyStarted)));

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_not_started() {
        let (_node, _display, mut runtime) = make_runtime();
        assert!(matches!(runtime.shutdown().await, Err(ClientError::NotStarted)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_save_check_interval_completes_handshake() {
        let node = Arc::new(MockNode::new());
        let display = SharedDisplay::new();
        let config = ClientConfig::default().with_save_check_interval(Duration::ZERO);
        let mut runtime = WalletRuntime::new(config, node.clone(), Arc::new(display.clone()));

        runtime.start().unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(node.save_check_count() > 1);

        node.set_save_flag(true);
        runtime.wait_for_shutdown().await;
        assert!(runtime.session().is_closed());
        assert_eq!(node.saved_books().len(), 1);

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_node_shutdown_stops_everything() {
        let (node, display, mut runtime) = make_runtime();
        node.set_address_book_body(Some(r#"{"alice":"addr1"}"#));
        runtime.start().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        node.set_save_flag(true);
        runtime.wait_for_shutdown().await;

        assert!(runtime.session().is_closed());
        assert_eq!(node.saved_books().len(), 1);
        assert!(display.snapshot().shutdown);

        runtime.shutdown().await.unwrap();

        let calls = node.node_status_calls();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(node.node_status_calls(), calls);
    }
}
