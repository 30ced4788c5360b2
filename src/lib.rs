//! Polykeeper - order submission and oracle price verification keeper.
//!
//! Submits one order to a prediction market venue, then polls the venue's
//! oracle subsystem on a fixed period and triggers price verification
//! whenever pending price data exists.
//!
//! # Modules
//!
//! - [`domain`] - Order requests, signed orders, order contexts, positions
//! - [`port`] - Venue and oracle capability traits
//! - [`application`] - Order submitter and verification keeper
//! - [`adapter`] - Polynance HTTP adapter
//! - [`infrastructure`] - Configuration, wallet, runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use polykeeper::application::keeper::config::KeeperConfig;
//! use polykeeper::application::keeper::VerificationKeeper;
//! use polykeeper::port::outbound::venue::PriceVerifier;
//!
//! async fn keep(verifier: Arc<dyn PriceVerifier>) {
//!     let (_tx, shutdown) = tokio::sync::watch::channel(false);
//!     VerificationKeeper::new(verifier, KeeperConfig::default())
//!         .run(shutdown)
//!         .await;
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(feature = "testkit")]
pub mod testkit;
