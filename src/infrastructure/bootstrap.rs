//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::polynance::PolynanceClient;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::wallet::Wallet;

/// Wallet plus the venue client built on it, constructed once per process.
pub struct Services {
    pub wallet: Arc<Wallet>,
    pub client: Arc<PolynanceClient>,
}

impl Services {
    /// Trader address as sent to the venue.
    #[must_use]
    pub fn trader(&self) -> String {
        self.wallet.address().to_checksum(None)
    }
}

/// Connect the wallet and build the venue client.
///
/// # Errors
///
/// Returns an error if the wallet configuration is invalid or the RPC
/// endpoint cannot be reached.
pub async fn build_services(config: &Config) -> Result<Services> {
    let wallet = Arc::new(Wallet::connect(&config.wallet).await?);
    let client = Arc::new(PolynanceClient::from_config(
        &config.venue,
        Arc::clone(&wallet),
    ));
    info!(api_url = %config.venue.api_url, "Venue client initialized");
    Ok(Services { wallet, client })
}
