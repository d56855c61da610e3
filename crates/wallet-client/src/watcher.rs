//! Shutdown handshake with the node.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::config::MIN_POLL_INTERVAL;
use crate::session::Session;

/// Polls the save-check endpoint and performs the terminal transition.
///
/// When the node answers `{"save": true}` the watcher saves the address
/// book once, locks the session, replaces the view with the shutdown
/// notice and raises the stop signal for every poller. There is no way
/// back. Failed checks are ignored and polling continues.
pub struct ShutdownWatcher {
    session: Arc<Session>,
    period: Duration,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
}

impl ShutdownWatcher {
    /// Creates a watcher that raises `stop_tx` on shutdown.
    ///
    /// A zero `period` is raised to [`MIN_POLL_INTERVAL`].
    pub fn new(session: Arc<Session>, period: Duration, stop_tx: Arc<watch::Sender<bool>>) -> Self {
        let stop_rx = stop_tx.subscribe();
        Self {
            session,
            period: period.max(MIN_POLL_INTERVAL),
            stop_tx,
            stop_rx,
        }
    }

    /// Run until the node signals shutdown or the stop signal is raised.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.period);
        // Checks never overlap; a slow check pushes the next one back
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!(period_ms = self.period.as_millis(), "starting shutdown watcher");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.check().await {
                        break;
                    }
                }
                changed = self.stop_rx.changed() => {
                    if changed.is_err() || *self.stop_rx.borrow() {
                        debug!("shutdown watcher received stop signal");
                        break;
                    }
                }
            }
        }

        debug!("shutdown watcher stopped");
    }

    /// One save-check round. Returns true once the session is shut down.
    async fn check(&self) -> bool {
        match self.session.api().save_check().await {
            Ok(check) if check.save => {
                self.shut_down().await;
                true
            }
            Ok(_) => {
                trace!("node not shutting down");
                false
            }
            Err(e) => {
                debug!(error = %e, "save check failed");
                false
            }
        }
    }

    async fn shut_down(&self) {
        info!("node is shutting down, saving address book");
        // Failure is already logged by the session; the transition goes ahead
        let _ = self.session.save_address_book().await;

        self.session.close();
        self.session.view().show_shutdown_notice();
        self.stop_tx.send_replace(true);

        info!("session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockNode;
    use crate::view::SharedDisplay;

    fn make_watcher(
        period: Duration,
    ) -> (Arc<MockNode>, SharedDisplay, Arc<Session>, watch::Receiver<bool>, ShutdownWatcher) {
        let node = Arc::new(MockNode::new());
        let display = SharedDisplay::new();
        let session = Arc::new(Session::new(node.clone(), Arc::new(display.clone())));
        let (stop_tx, stop_rx) = watch::channel(false);
        let watcher = ShutdownWatcher::new(session.clone(), period, Arc::new(stop_tx));
        (node, display, session, stop_rx, watcher)
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_signal_saves_once_and_locks() {
        let (node, display, session, stop_rx, mut watcher) = make_watcher(Duration::from_secs(2));
        session.add_address("alice", "addr1").unwrap();

        let handle = tokio::spawn(async move { watcher.run().await });

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(node.saved_books().is_empty());
        assert!(!session.is_closed());

        node.set_save_flag(true);
        handle.await.unwrap();

        let saved = node.saved_books();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].get("alice"), Some("addr1"));

        assert!(session.is_closed());
        assert!(*stop_rx.borrow());
        let state = display.snapshot();
        assert!(state.shutdown);
        assert!(state.address_list.is_empty());

        // Nothing polls after the transition
        let checks = node.save_check_count();
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(node.save_check_count(), checks);
        assert_eq!(node.saved_books().len(), 1);
        assert!(session.add_address("bob", "addr2").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_checks_keep_polling() {
        let (node, _display, session, _stop_rx, mut watcher) = make_watcher(Duration::from_secs(1));
        node.fail_save_checks(true);

        let handle = tokio::spawn(async move { watcher.run().await });

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(node.save_check_count(), 4);
        assert!(!session.is_closed());

        node.fail_save_checks(false);
        node.set_save_flag(true);
        handle.await.unwrap();
        assert!(session.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_proceeds_when_save_fails() {
        let (node, display, session, _stop_rx, mut watcher) = make_watcher(Duration::from_secs(1));
        node.fail_saves(true);
        node.set_save_flag(true);

        watcher.run().await;

        assert!(session.is_closed());
        assert!(display.snapshot().shutdown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_still_checks() {
        let (node, _display, session, _stop_rx, mut watcher) = make_watcher(Duration::ZERO);

        let handle = tokio::spawn(async move { watcher.run().await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(node.save_check_count() > 1);

        node.set_save_flag(true);
        handle.await.unwrap();
        assert!(session.is_closed());
        assert_eq!(node.saved_books().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_signal_ends_watcher() {
        let node = Arc::new(MockNode::new());
        let session = Arc::new(Session::new(node.clone(), Arc::new(SharedDisplay::new())));
        let stop_tx = Arc::new(watch::channel(false).0);
        let mut watcher = ShutdownWatcher::new(session.clone(), Duration::from_secs(1), stop_tx.clone());

        let handle = tokio::spawn(async move { watcher.run().await });
        tokio::time::sleep(Duration::from_millis(1500)).await;

        stop_tx.send_replace(true);
        handle.await.unwrap();

        assert!(!session.is_closed());
        assert!(node.saved_books().is_empty());
    }
}
