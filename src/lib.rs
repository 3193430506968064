//! A token-settled shop: owner-managed product listings with per-token prices,
//! sold one unit at a time against allowances granted on a token ledger.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod telemetry;
