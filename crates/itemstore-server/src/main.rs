//! Item Store service binary.
//!
//! Wires configuration, logging and the HTTP server together and runs
//! until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `itemstore-config.yaml` (or `ITEMSTORE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Create the empty item store and application state
//! 4. Spawn the HTTP server with a Ctrl-C shutdown signal
//! 5. Wait for the server to drain and exit

mod error;

use std::sync::Arc;

use itemstore_api::AppState;
use itemstore_core::ServiceConfig;
use itemstore_core::config::{LogFormat, LoggingConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the server fails
/// to start or run.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run().await.map_err(Into::into)
}

async fn run() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so failures surface
    //    through the returned error only.
    let config_path = ServiceConfig::default_path();
    let config_found = config_path.exists();
    let config = ServiceConfig::load(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("itemstore-server starting");

    if config_found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        title = config.api.title,
        version = config.api.version,
        host = config.server.host,
        port = config.server.port,
        static_dir = %config.static_files.dir.display(),
        docs_enabled = config.api.docs_enabled,
        "Service configuration"
    );

    // 3. Create application state around an empty store.
    let state = Arc::new(AppState::new(&config));

    // 4. Spawn the server.
    let handle = itemstore_api::spawn_server(&config.server, state, shutdown_signal())?;

    // 5. Wait for it to finish.
    handle.await.map_err(|e| AppError::Join {
        message: e.to_string(),
    })??;

    info!("itemstore-server shutdown complete");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => {
            // Without a signal handler the server would never stop cleanly;
            // keep serving until the process is killed.
            warn!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
