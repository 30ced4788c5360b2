//! Infrastructure configuration modules.

pub mod logging;
pub mod order;
pub mod settings;
pub mod venue;
pub mod wallet;
