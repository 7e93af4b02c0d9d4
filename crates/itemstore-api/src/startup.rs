//! Server startup helper.
//!
//! Provides [`spawn_server`] which launches the HTTP server on a
//! background Tokio task. The binary calls this during startup and then
//! awaits the returned handle.
//!
//! # Usage
//!
//! ```rust,ignore
//! use itemstore_api::{spawn_server, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(&config));
//! let handle = spawn_server(&config.server, state, shutdown_signal())?;
//! handle.await??;
//! ```

use std::future::Future;
use std::sync::Arc;

use itemstore_core::config::ServerConfig;
use tokio::task::JoinHandle;

use crate::server::{self, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the HTTP server on a background Tokio task.
///
/// The configured address is parsed eagerly so an obvious
/// misconfiguration is reported before the task is spawned. The actual
/// bind happens inside the task; its error surfaces through the handle.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured address is invalid.
pub fn spawn_server<F>(
    config: &ServerConfig,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<JoinHandle<Result<(), ServerError>>, StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = server::parse_addr(config)?;
    let config = config.clone();

    let handle = tokio::spawn(async move {
        let result = server::start_server(&config, state, shutdown).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "server exited with error");
        }
        result
    });

    tracing::info!(%addr, "server spawned on background task");

    Ok(handle)
}
