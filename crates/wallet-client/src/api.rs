//! Node API seam and its HTTP implementation.
//!
//! Every call is a single request with no timeout and no retry; a hung
//! request simply never resolves. HTTP status codes are not inspected, the
//! body alone decides between a value and a [`ClientError::Protocol`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use wallet_models::{
    AddressBook, NodeStatus, SaveCheck, TransactionRequest, TransactionResponse, UserStatus,
};

use crate::config::ClientConfig;
use crate::error::Result;

/// Address book endpoint (GET loads, POST saves).
pub const ADDRESS_BOOK_PATH: &str = "/api/address_book";
/// Node status endpoint.
pub const NODE_STATUS_PATH: &str = "/api/node_status";
/// User status endpoint.
pub const USER_STATUS_PATH: &str = "/api/user_status";
/// Transaction submission endpoint.
pub const TRANSACTION_PATH: &str = "/api/transaction";
/// Shutdown handshake endpoint.
pub const SAVE_CHECK_PATH: &str = "/api/save_check";

/// Body of a completed request that has not been read yet.
///
/// Submission clears the staged outputs between the request completing
/// and its body being read, so the two steps are kept apart.
#[async_trait]
pub trait PendingBody: Send {
    /// Reads the whole body as text.
    async fn text(self: Box<Self>) -> Result<String>;
}

/// Remote node operations used by a wallet session.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// GET the persisted address book.
    async fn fetch_address_book(&self) -> Result<AddressBook>;

    /// POST the full address book. The response body is ignored.
    async fn save_address_book(&self, book: &AddressBook) -> Result<()>;

    /// GET node height, mempool size and difficulty.
    async fn node_status(&self) -> Result<NodeStatus>;

    /// GET public key and balance.
    async fn user_status(&self) -> Result<UserStatus>;

    /// POST a transaction; resolves once the node has answered.
    async fn post_transaction(&self, request: &TransactionRequest) -> Result<Box<dyn PendingBody>>;

    /// GET the shutdown flag.
    async fn save_check(&self) -> Result<SaveCheck>;
}

/// Parses a transaction response body.
pub fn parse_transaction_response(body: &str) -> Result<TransactionResponse> {
    Ok(serde_json::from_str(body)?)
}

/// [`NodeApi`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpNodeClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpNodeClient {
    /// Creates a client for the node in `config`.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        trace!(url = %url, "GET");

        let response = self.http.get(&url).send().await?;
        debug!(url = %url, status = %response.status(), "node responded");

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

struct HttpBody(reqwest::Response);

#[async_trait]
impl PendingBody for HttpBody {
    async fn text(self: Box<Self>) -> Result<String> {
        Ok(self.0.text().await?)
    }
}

#[async_trait]
impl NodeApi for HttpNodeClient {
    async fn fetch_address_book(&self) -> Result<AddressBook> {
        self.get_json(ADDRESS_BOOK_PATH).await
    }

    async fn save_address_book(&self, book: &AddressBook) -> Result<()> {
        let url = self.config.endpoint(ADDRESS_BOOK_PATH);
        let response = self.http.post(&url).json(book).send().await?;
        debug!(url = %url, status = %response.status(), entries = book.len(), "address book posted");
        Ok(())
    }

    async fn node_status(&self) -> Result<NodeStatus> {
        self.get_json(NODE_STATUS_PATH).await
    }

    async fn user_status(&self) -> Result<UserStatus> {
        self.get_json(USER_STATUS_PATH).await
    }

    async fn post_transaction(&self, request: &TransactionRequest) -> Result<Box<dyn PendingBody>> {
        let url = self.config.endpoint(TRANSACTION_PATH);
        let response = self.http.post(&url).json(request).send().await?;
        debug!(url = %url, status = %response.status(), "transaction posted");
        Ok(Box::new(HttpBody(response)))
    }

    async fn save_check(&self) -> Result<SaveCheck> {
        self.get_json(SAVE_CHECK_PATH).await
    }
}
