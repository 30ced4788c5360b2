//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the keeper's application logic and the
//! venue/oracle services it drives.
//!
//! ```text
//!   ┌───────────────┐      ┌────────────────────┐
//!   │ OrderSubmitter│      │ VerificationKeeper │
//!   └───────┬───────┘      └─────────┬──────────┘
//!           ▼                        ▼
//!     ┌───────────┐           ┌───────────────┐
//!     │ OrderVenue│           │ PriceVerifier │
//!     └─────┬─────┘           └───────┬───────┘
//!           └──────────┬──────────────┘
//!                      ▼
//!              PolynanceClient (adapter)
//! ```

pub mod outbound;
