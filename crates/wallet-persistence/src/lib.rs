//! Persistence layer for the wallet address book.
//!
//! The book is stored as a flat JSON object using atomic file operations
//! (write to temp file, then rename).
//!
//! # Example
//!
//! ```no_run
//! use wallet_persistence::AddressBookStore;
//! use wallet_models::AddressBook;
//!
//! let store = AddressBookStore::new("/home/user/.wallet/address_book.json");
//!
//! let mut book = AddressBook::new();
//! book.add("alice", "02ab").unwrap();
//! store.save(&book).unwrap();
//!
//! let loaded = store.load_or_default();
//! assert_eq!(loaded.get("alice"), Some("02ab"));
//! ```

pub mod atomic;
pub mod error;
pub mod store;

pub use error::{PersistenceError, Result};
pub use store::AddressBookStore;
