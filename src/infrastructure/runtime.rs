//! Keeper process lifecycle.
//!
//! Submits the configured order once, logs the trader's positions, then
//! hands over to the verification keeper until shutdown. A failed
//! submission aborts the run before the keeper is installed.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::application::keeper::config::KeeperConfig;
use crate::application::keeper::{KeeperStats, VerificationKeeper};
use crate::application::submitter::OrderSubmitter;
use crate::domain::OrderRequest;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_services;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::venue::{OrderVenue, PriceVerifier};

/// Run with an externally controlled shutdown signal.
pub async fn run_with_shutdown(
    config: Config,
    shutdown: watch::Receiver<bool>,
) -> Result<KeeperStats> {
    let request = config.order_request()?;
    let services = build_services(&config).await?;
    let trader = services.trader();

    let venue: Arc<dyn OrderVenue> = services.client.clone();
    let verifier: Arc<dyn PriceVerifier> = services.client;
    run_keeper(
        &request,
        venue,
        verifier,
        &trader,
        config.keeper,
        shutdown,
    )
    .await
}

/// Submit `request`, report positions for `trader`, then run the keeper.
///
/// # Errors
///
/// Returns the build or execution error if submission fails; the keeper
/// is not started in that case. Keeper cycle errors never surface here.
pub async fn run_keeper(
    request: &OrderRequest,
    venue: Arc<dyn OrderVenue>,
    verifier: Arc<dyn PriceVerifier>,
    trader: &str,
    keeper: KeeperConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<KeeperStats> {
    let submitter = OrderSubmitter::new(venue);
    let context = submitter.submit(request).await?;
    info!(context = %context, "Order submitted");

    submitter.report_positions(request, trader).await;

    info!("Starting verification interval");
    let keeper = VerificationKeeper::new(verifier, keeper);
    Ok(keeper.run(shutdown).await)
}
