//! Response types specific to the API.

pub mod responses;

pub use responses::*;
