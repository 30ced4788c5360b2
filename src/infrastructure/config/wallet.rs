//! Wallet configuration for signing orders.

use std::str::FromStr;

use alloy_signer_local::PrivateKeySigner;
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the chain RPC endpoint.
pub const RPC_URL_ENV: &str = "POLYGON_RPC_URL";

/// Environment variable holding the wallet private key.
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Wallet settings. Both values come from the environment, never the config file.
#[derive(Clone, Default)]
pub struct WalletConfig {
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
}

impl WalletConfig {
    /// Read wallet settings through `lookup`, treating blank values as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            rpc_url: read(RPC_URL_ENV),
            private_key: read(PRIVATE_KEY_ENV),
        }
    }

    /// The RPC endpoint as a parsed URL.
    ///
    /// # Errors
    ///
    /// `MissingField` when unset, `InvalidValue` when it is not a URL.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let raw = self.rpc_url.as_deref().ok_or(ConfigError::MissingField {
            field: RPC_URL_ENV,
        })?;
        Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
            field: RPC_URL_ENV,
            reason: e.to_string(),
        })
    }

    /// The private key as a local signer.
    ///
    /// # Errors
    ///
    /// `MissingField` when unset or blank, `InvalidValue` when it is not a key.
    pub fn signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        parse_private_key(self.private_key.as_deref().unwrap_or_default())
    }
}

/// Parse a hex secp256k1 private key.
///
/// # Errors
///
/// `MissingField` for a blank key, `InvalidValue` for a malformed one.
pub fn parse_private_key(raw: &str) -> Result<PrivateKeySigner, ConfigError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(ConfigError::MissingField {
            field: PRIVATE_KEY_ENV,
        });
    }
    PrivateKeySigner::from_str(key).map_err(|e| ConfigError::InvalidValue {
        field: PRIVATE_KEY_ENV,
        reason: e.to_string(),
    })
}

// Keep the key out of debug output.
impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
