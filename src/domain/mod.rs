//! Domain types and the ports the application layer talks through.

pub mod address;
pub mod amount;
pub mod command;
pub mod event;
pub mod ports;
pub mod product;
pub mod token;
