//! Trading wallet.
//!
//! Built once at startup from [`WalletConfig`] and shared read-only with
//! the venue adapter. Nothing here is a global.

use alloy_primitives::{hex, Address};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use tracing::info;

use crate::error::{Error, Result};
use crate::infrastructure::config::wallet::{parse_private_key, WalletConfig};

/// Local signer bound to the chain served by the configured RPC endpoint.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    chain_id: u64,
}

impl Wallet {
    /// Parse the key, query the RPC endpoint for its chain id, and bind the signer to it.
    ///
    /// # Errors
    ///
    /// Returns a config error for a missing or malformed key/URL and
    /// [`Error::Wallet`] if the RPC endpoint cannot be reached.
    pub async fn connect(config: &WalletConfig) -> Result<Self> {
        let rpc_url = config.endpoint()?;
        let signer = config.signer()?;

        let provider = ProviderBuilder::new().connect_http(rpc_url);
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| Error::Wallet(format!("failed to query chain id: {e}")))?;

        let wallet = Self::with_chain_id(signer, chain_id);
        info!(address = %wallet.address(), chain_id, "Wallet connected");
        Ok(wallet)
    }

    /// Build a wallet for a known chain without contacting the RPC endpoint.
    ///
    /// # Errors
    ///
    /// Returns a config error if the key is missing or malformed.
    pub fn offline(private_key: &str, chain_id: u64) -> Result<Self> {
        let signer = parse_private_key(private_key)?;
        Ok(Self::with_chain_id(signer, chain_id))
    }

    fn with_chain_id(signer: PrivateKeySigner, chain_id: u64) -> Self {
        Self {
            signer: signer.with_chain_id(Some(chain_id)),
            chain_id,
        }
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// EIP-191 personal-sign `message`, returning the 0x-prefixed signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Wallet`] if signing fails.
    pub async fn sign_message(&self, message: &[u8]) -> Result<String> {
        let signature = self
            .signer
            .sign_message(message)
            .await
            .map_err(|e| Error::Wallet(format!("failed to sign message: {e}")))?;
        Ok(hex::encode_prefixed(signature.as_bytes()))
    }
}
