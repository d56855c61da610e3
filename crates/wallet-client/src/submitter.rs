//! Transaction submission.

use std::sync::Arc;

use tracing::{debug, info, warn};

use wallet_models::TransactionResponse;

use crate::api::parse_transaction_response;
use crate::error::{ClientError, Result};
use crate::poller::refresh_status;
use crate::session::Session;

/// Builds a transaction from the staged outputs and submits it.
///
/// Submission consumes the staged batch: as soon as the node has answered,
/// the staged outputs and the fee field are cleared, whether or not the
/// transaction was accepted and before the answer is even read.
#[derive(Clone)]
pub struct TransactionSubmitter {
    session: Arc<Session>,
}

impl TransactionSubmitter {
    /// Creates a submitter for a session.
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Parses the fee field and submits.
    ///
    /// The fee field gates submission: a non-numeric fee raises the
    /// "That's not a valid fee" alert and nothing is sent, with the staged
    /// outputs and fee text left as they were. Any integer, negative
    /// included, is sent for the node to judge.
    ///
    /// # Errors
    /// Returns `SessionClosed` after the shutdown handshake,
    /// `Model(InvalidAmount)` for an unparsable fee, and otherwise whatever
    /// [`TransactionSubmitter::submit`] returns.
    pub async fn submit_with_fee_input(&self) -> Result<TransactionResponse> {
        if self.session.is_closed() {
            return Err(ClientError::SessionClosed);
        }
        let fee = self.session.parse_fee_input()?;
        self.submit(fee).await
    }

    /// Submits the staged outputs with `fee`.
    ///
    /// Labels are resolved at this moment; one that has disappeared from
    /// the address book is sent with a `null` address. Network and protocol
    /// failures are logged and returned without any message on the view.
    pub async fn submit(&self, fee: i64) -> Result<TransactionResponse> {
        if self.session.is_closed() {
            return Err(ClientError::SessionClosed);
        }

        let request = self.session.resolve_transaction(fee);
        info!(
            outputs = request.recipients.len(),
            fee = request.fee,
            total = request.total_spend(),
            "submitting transaction"
        );
        if request.unresolved_count() > 0 {
            debug!(
                unresolved = request.unresolved_count(),
                "submitting outputs whose label is no longer in the address book"
            );
        }

        let body = match self.session.api().post_transaction(&request).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "transaction request failed");
                return Err(e);
            }
        };

        self.session.clear_transaction();

        let response = match body.text().await.and_then(|text| parse_transaction_response(&text)) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "unreadable transaction response");
                return Err(e);
            }
        };

        info!(success = response.success, message = %response.message, "transaction answered");
        self.session.view().show_transaction_result(&response);

        refresh_status(&self.session).await;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockNode, TxReply};
    use crate::view::SharedDisplay;
    use serde_json::json;
    use wallet_models::{NodeStatus, UserStatus};

    fn make_submitter() -> (Arc<MockNode>, SharedDisplay, Arc<Session>, TransactionSubmitter) {
        let node = Arc::new(MockNode::new());
        let display = SharedDisplay::new();
        let session = Arc::new(Session::new(node.clone(), Arc::new(display.clone())));
        let submitter = TransactionSubmitter::new(session.clone());
        (node, display, session, submitter)
    }

    #[tokio::test]
    async fn test_submit_resolves_through_address_book() {
        let (node, display, session, submitter) = make_submitter();
        session.add_address("alice", "addr1").unwrap();
        session.stage("alice", 5).unwrap();

        let response = submitter.submit(2).await.unwrap();

        assert!(response.success);
        let requests = node.transaction_requests();
        assert_eq!(
            serde_json::to_value(&requests[0]).unwrap(),
            json!({"recipients": [["addr1", 5]], "fee": 2})
        );

        let state = display.snapshot();
        assert_eq!(state.message, Some(TransactionResponse::accepted("ok")));
        assert!(state.recipients.is_none());
        assert!(session.staged().is_empty());
    }

    #[tokio::test]
    async fn test_submit_forwards_unknown_label_and_clears() {
        let (node, display, session, submitter) = make_submitter();
        session.stage("bob", 5).unwrap();
        node.set_tx_reply(TxReply::Body(
            r#"{"success":false,"message":"unknown recipient"}"#.to_string(),
        ));

        let response = submitter.submit(0).await.unwrap();

        assert!(!response.success);
        assert_eq!(node.transaction_requests()[0].recipients, vec![(None, 5)]);
        assert!(session.staged().is_empty());
        assert_eq!(
            display.snapshot().message,
            Some(TransactionResponse::rejected("unknown recipient"))
        );
    }

    #[tokio::test]
    async fn test_submit_clears_before_reading_body() {
        let (node, display, session, submitter) = make_submitter();
        session.stage("alice", 5).unwrap();
        session.set_fee_input("2").unwrap();
        node.set_tx_reply(TxReply::BodyFails);

        let err = submitter.submit_with_fee_input().await.unwrap_err();

        assert!(matches!(err, ClientError::Network(_)));
        assert!(session.staged().is_empty());
        assert_eq!(session.fee_input(), "");
        assert!(display.snapshot().message.is_none());
    }

    #[tokio::test]
    async fn test_malformed_response_is_protocol_error() {
        let (node, display, session, submitter) = make_submitter();
        session.stage("alice", 5).unwrap();
        node.set_tx_reply(TxReply::Body("Internal Server Error".to_string()));

        let err = submitter.submit(1).await.unwrap_err();

        assert!(matches!(err, ClientError::Protocol(_)));
        assert!(session.staged().is_empty());
        assert!(display.snapshot().message.is_none());
    }

    #[tokio::test]
    async fn test_network_failure_keeps_staging_and_previous_message() {
        let (node, display, session, submitter) = make_submitter();
        session.stage("alice", 5).unwrap();
        submitter.submit(1).await.unwrap();

        session.stage("alice", 7).unwrap();
        node.set_tx_reply(TxReply::SendFails);
        let err = submitter.submit(1).await.unwrap_err();

        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(session.staged().len(), 1);
        // Result of the earlier attempt stays on screen
        assert_eq!(display.snapshot().message, Some(TransactionResponse::accepted("ok")));
    }

    #[tokio::test]
    async fn test_invalid_fee_sends_nothing() {
        let (node, display, session, submitter) = make_submitter();
        session.stage("alice", 5).unwrap();
        session.set_fee_input("cheap").unwrap();

        assert!(submitter.submit_with_fee_input().await.is_err());

        assert!(node.transaction_requests().is_empty());
        assert_eq!(session.staged().len(), 1);
        assert_eq!(display.snapshot().alerts.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_refreshes_status() {
        let (node, display, session, submitter) = make_submitter();
        node.set_node_status(Some(NodeStatus {
            height: 7,
            mempool_size: 1,
            difficulty: 3,
        }));
        node.set_user_status(Some(UserStatus {
            pk: "02ab".into(),
            amount: 40,
        }));
        session.stage("alice", 5).unwrap();

        submitter.submit(1).await.unwrap();

        assert_eq!(node.node_status_calls(), 1);
        assert_eq!(node.user_status_calls(), 1);
        let state = display.snapshot();
        assert_eq!(state.node_status.unwrap().value.height, 7);
        assert_eq!(state.user_status.unwrap().value.amount, 40);
    }

    #[tokio::test]
    async fn test_edits_during_flight_are_consumed() {
        let (node, _display, session, submitter) = make_submitter();
        session.add_address("alice", "addr1").unwrap();
        session.stage("alice", 5).unwrap();
        let gate = node.hold_transactions();

        let task = {
            let submitter = submitter.clone();
            tokio::spawn(async move { submitter.submit(1).await })
        };

        node.transaction_posted().await;
        // Staged while the request is in flight: not in the request, but
        // still wiped when it completes
        session.stage("alice", 9).unwrap();
        gate.notify_one();

        task.await.unwrap().unwrap();

        assert_eq!(node.transaction_requests()[0].recipients.len(), 1);
        assert!(session.staged().is_empty());
    }

    #[tokio::test]
    async fn test_closed_session_refuses_submit() {
        let (node, _display, session, submitter) = make_submitter();
        session.stage("alice", 5).unwrap();
        session.close();

        assert!(matches!(submitter.submit(1).await, Err(ClientError::SessionClosed)));
        assert!(node.transaction_requests().is_empty());
    }
}
