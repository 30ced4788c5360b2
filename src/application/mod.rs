//! Application services (use cases).
//!
//! These services drive the venue ports to submit an order and keep
//! pending oracle verifications moving.

pub mod keeper;
pub mod submitter;
