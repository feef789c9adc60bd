use orderwatch::application::StopReason;
use orderwatch::infrastructure::bootstrap::build_supervisor;
use orderwatch::infrastructure::config::settings::{Config, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let config = match Config::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!(
        config = %path,
        lookback_minutes = config.poll.lookback_minutes,
        interval_secs = config.poll.interval_secs,
        "orderwatch starting"
    );

    let supervisor = match build_supervisor(&config) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to initialize");
            std::process::exit(1);
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    match supervisor.run(shutdown_rx).await {
        Ok(StopReason::Interrupted) => info!("orderwatch stopped"),
        Ok(reason) => {
            warn!(reason = ?reason, "orderwatch aborted");
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Fatal error");
            std::process::exit(1);
        }
    }
}
