//! Core data models for the wallet page.
//!
//! This crate holds the state a wallet session stages locally and the JSON
//! shapes exchanged with the node:
//! - `AddressBook` - unique label to address mapping, insertion ordered
//! - `RecipientStaging` - ordered (label, amount) outputs awaiting submission
//! - `TransactionRequest` / `TransactionResponse` - the submit round-trip
//! - `NodeStatus`, `UserStatus`, `SaveCheck` - read-only node snapshots
//!
//! Nothing here performs I/O.

pub mod address_book;
pub mod amount;
pub mod error;
pub mod staging;
pub mod status;
pub mod transaction;

pub use address_book::{AddressBook, AddressBookEntry};
pub use amount::parse_amount;
pub use error::{ModelError, Result};
pub use staging::{PendingRecipient, RecipientStaging};
pub use status::{NodeStatus, SaveCheck, UserStatus};
pub use transaction::{TransactionRequest, TransactionResponse};
