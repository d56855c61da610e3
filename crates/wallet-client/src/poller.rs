//! Periodic node and user status refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, trace, warn};

use crate::config::MIN_POLL_INTERVAL;
use crate::session::Session;

/// Fetches node and user status once and shows whatever arrives.
///
/// Both fetches run concurrently and fail independently: an error on one
/// side is logged and does not hold back the other side's update.
pub async fn refresh_status(session: &Session) {
    let api = session.api();
    let view = session.view();

    let node = async {
        match api.node_status().await {
            Ok(status) => view.show_node_status(&status),
            Err(e) => warn!(error = %e, "failed to fetch node status"),
        }
    };
    let user = async {
        match api.user_status().await {
            Ok(status) => view.show_user_status(&status),
            Err(e) => warn!(error = %e, "failed to fetch user status"),
        }
    };

    tokio::join!(node, user);
}

/// Refreshes status on a fixed interval until stopped.
///
/// The first tick fires immediately. Every tick spawns its own refresh, so
/// a slow node can have several refreshes in flight at once; each applies
/// its result when it completes and the last to complete wins.
pub struct StatusPoller {
    session: Arc<Session>,
    period: Duration,
    shutdown: watch::Receiver<bool>,
}

impl StatusPoller {
    /// Creates a status poller; a zero `period` is raised to [`MIN_POLL_INTERVAL`].
    pub fn new(session: Arc<Session>, period: Duration, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            session,
            period: period.max(MIN_POLL_INTERVAL),
            shutdown,
        }
    }

    /// Run the polling loop until the stop signal.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.period);

        debug!(period_ms = self.period.as_millis(), "starting status poller");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    trace!("status tick");
                    let session = Arc::clone(&self.session);
                    tokio::spawn(async move {
                        refresh_status(&session).await;
                    });
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        debug!("status poller received stop signal");
                        break;
                    }
                }
            }
        }

        debug!("status poller stopped");
    }
}
