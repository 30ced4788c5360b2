//! Polynance venue integration.
//!
//! One HTTP client serves both the order-side and the oracle-verification
//! capabilities; orders are signed locally with the trading wallet.

pub mod client;
pub mod dto;

pub use client::PolynanceClient;
