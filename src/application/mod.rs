//! Application layer: the shop itself and the processor that feeds it commands.
//!
//! `Shop` owns the product store and the token ledger and serializes every
//! mutating call behind a `tokio` mutex, so each call is all-or-nothing.

pub mod processor;
pub mod shop;
