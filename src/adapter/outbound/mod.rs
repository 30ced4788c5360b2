//! Outbound adapters (driven side).

pub mod polynance;
