//! Infrastructure layer.
//!
//! Configuration, wallet construction, and process wiring.
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`runtime`] - Submit-then-keep lifecycle
//! - [`wallet`] - Trading wallet

pub mod bootstrap;
pub mod config;
pub mod runtime;
pub mod wallet;
