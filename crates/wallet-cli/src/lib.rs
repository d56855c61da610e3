//! Wallet CLI library.
//!
//! This crate provides the terminal wallet (an interactive REPL over a
//! wallet session) and a development node serving the wallet API.

pub mod cli;
pub mod error;
pub mod repl;
pub mod serve;
pub mod terminal;
