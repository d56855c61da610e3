//! API request handlers.

pub mod address_book;
pub mod health;
pub mod save_check;
pub mod status;
pub mod transaction;

pub use address_book::*;
pub use health::*;
pub use save_check::*;
pub use status::*;
pub use transaction::*;
