use std::path::PathBuf;

use clap::Parser;
use polykeeper::infrastructure::config::settings::Config;
use polykeeper::infrastructure::runtime;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Submit an order, then keep pending oracle price verifications moving.
#[derive(Debug, Parser)]
#[command(name = "polykeeper", version, about)]
struct Cli {
    /// Path to the TOML config file; defaults apply when it does not exist.
    #[arg(long, default_value = "keeper.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("polykeeper starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let run = runtime::run_with_shutdown(config, shutdown_rx);
    tokio::pin!(run);

    tokio::select! {
        result = &mut run => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
            // Let an in-flight cycle finish before exiting.
            if let Err(e) = run.await {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
    }

    info!("polykeeper stopped");
}
