//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new `", stringify!($name), "` from a string.")]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[doc = concat!("Get the `", stringify!($name), "` as a string slice.")]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the identifier is empty or whitespace only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Venue (provider) identifier, e.g. `polymarket`.
    VenueId
);

string_id!(
    /// Market identifier or slug on a venue.
    MarketRef
);

string_id!(
    /// Position identifier or outcome name within a market, e.g. `YES`.
    PositionRef
);

string_id!(
    /// Identifier of an order whose oracle price data is awaiting confirmation.
    PendingOrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detects_whitespace_only() {
        assert!(MarketRef::new("  ").is_blank());
        assert!(!MarketRef::new("will-it-rain").is_blank());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = PendingOrderId::from("0xabc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0xabc\"");
    }
}
