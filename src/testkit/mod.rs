//! Shared test utilities available to integration tests.
//!
//! Enabled via the `testkit` feature.
//!
//! # Modules
//!
//! - [`venue`] - `ScriptedVenue`, an in-memory [`OrderVenue`](crate::port::outbound::venue::OrderVenue)
//!   and [`PriceVerifier`](crate::port::outbound::venue::PriceVerifier) that
//!   records every call.
//! - [`domain`] - Builders for order requests and pending ids.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod venue;
