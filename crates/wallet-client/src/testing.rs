//! Scriptable in-memory node used by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use wallet_models::{AddressBook, NodeStatus, SaveCheck, TransactionRequest, UserStatus};

use crate::api::{NodeApi, PendingBody};
use crate::error::{ClientError, Result};

/// How the mock answers a transaction POST.
#[derive(Debug, Clone)]
pub(crate) enum TxReply {
    Body(String),
    SendFails,
    BodyFails,
}

struct MockBody(Option<String>);

#[async_trait]
impl PendingBody for MockBody {
    async fn text(self: Box<Self>) -> Result<String> {
        self.0
            .ok_or_else(|| ClientError::Network("connection reset".to_string()))
    }
}

pub(crate) struct MockNode {
    book_body: Mutex<Option<String>>,
    saved: Mutex<Vec<AddressBook>>,
    fail_saves: AtomicBool,
    node_status: Mutex<Option<NodeStatus>>,
    user_status: Mutex<Option<UserStatus>>,
    tx_reply: Mutex<TxReply>,
    tx_requests: Mutex<Vec<TransactionRequest>>,
    tx_gate: Mutex<Option<Arc<Notify>>>,
    tx_posted: Notify,
    save_flag: AtomicBool,
    fail_save_checks: AtomicBool,
    save_checks: AtomicUsize,
    node_status_calls: AtomicUsize,
    user_status_calls: AtomicUsize,
}

impl MockNode {
    pub(crate) fn new() -> Self {
        Self {
            book_body: Mutex::new(Some("{}".to_string())),
            saved: Mutex::new(Vec::new()),
            fail_saves: AtomicBool::new(false),
            node_status: Mutex::new(Some(NodeStatus::default())),
            user_status: Mutex::new(Some(UserStatus::default())),
            tx_reply: Mutex::new(TxReply::Body(
                r#"{"success":true,"message":"ok"}"#.to_string(),
            )),
            tx_requests: Mutex::new(Vec::new()),
            tx_gate: Mutex::new(None),
            tx_posted: Notify::new(),
            save_flag: AtomicBool::new(false),
            fail_save_checks: AtomicBool::new(false),
            save_checks: AtomicUsize::new(0),
            node_status_calls: AtomicUsize::new(0),
            user_status_calls: AtomicUsize::new(0),
        }
    }

    /// `None` makes the GET fail at the network layer.
    pub(crate) fn set_address_book_body(&self, body: Option<&str>) {
        *self.book_body.lock().unwrap() = body.map(str::to_string);
    }

    pub(crate) fn saved_books(&self) -> Vec<AddressBook> {
        self.saved.lock().unwrap().clone()
    }

    pub(crate) fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_node_status(&self, status: Option<NodeStatus>) {
        *self.node_status.lock().unwrap() = status;
    }

    pub(crate) fn set_user_status(&self, status: Option<UserStatus>) {
        *self.user_status.lock().unwrap() = status;
    }

    pub(crate) fn set_tx_reply(&self, reply: TxReply) {
        *self.tx_reply.lock().unwrap() = reply;
    }

    pub(crate) fn transaction_requests(&self) -> Vec<TransactionRequest> {
        self.tx_requests.lock().unwrap().clone()
    }

    /// Holds every transaction POST until the returned gate is notified.
    pub(crate) fn hold_transactions(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.tx_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Resolves once a transaction POST has been received.
    pub(crate) async fn transaction_posted(&self) {
        self.tx_posted.notified().await;
    }

    pub(crate) fn set_save_flag(&self, save: bool) {
        self.save_flag.store(save, Ordering::SeqCst);
    }

    pub(crate) fn fail_save_checks(&self, fail: bool) {
        self.fail_save_checks.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn save_check_count(&self) -> usize {
        self.save_checks.load(Ordering::SeqCst)
    }

    pub(crate) fn node_status_calls(&self) -> usize {
        self.node_status_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn user_status_calls(&self) -> usize {
        self.user_status_calls.load(Ordering::SeqCst)
    }
}

fn unreachable_node() -> ClientError {
    ClientError::Network("connection refused".to_string())
}

#[async_trait]
impl NodeApi for MockNode {
    async fn fetch_address_book(&self) -> Result<AddressBook> {
        let body = self.book_body.lock().unwrap().clone();
        let body = body.ok_or_else(unreachable_node)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn save_address_book(&self, book: &AddressBook) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(unreachable_node());
        }
        self.saved.lock().unwrap().push(book.clone());
        Ok(())
    }

    async fn node_status(&self) -> Result<NodeStatus> {
        self.node_status_calls.fetch_add(1, Ordering::SeqCst);
        let status = *self.node_status.lock().unwrap();
        status.ok_or_else(unreachable_node)
    }

    async fn user_status(&self) -> Result<UserStatus> {
        self.user_status_calls.fetch_add(1, Ordering::SeqCst);
        let status = self.user_status.lock().unwrap().clone();
        status.ok_or_else(unreachable_node)
    }

    async fn post_transaction(&self, request: &TransactionRequest) -> Result<Box<dyn PendingBody>> {
        self.tx_requests.lock().unwrap().push(request.clone());
        self.tx_posted.notify_one();

        let gate = self.tx_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let reply = self.tx_reply.lock().unwrap().clone();
        match reply {
            TxReply::Body(body) => Ok(Box::new(MockBody(Some(body)))),
            TxReply::BodyFails => Ok(Box::new(MockBody(None))),
            TxReply::SendFails => Err(unreachable_node()),
        }
    }

    async fn save_check(&self) -> Result<SaveCheck> {
        self.save_checks.fetch_add(1, Ordering::SeqCst);
        if self.fail_save_checks.load(Ordering::SeqCst) {
            return Err(unreachable_node());
        }
        Ok(SaveCheck {
            save: self.save_flag.load(Ordering::SeqCst),
        })
    }
}
