//! Error types for the server binary.
//!
//! [`AppError`] is the top-level error type that wraps all possible
//! failure modes during startup and while serving.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: itemstore_core::ConfigError,
    },

    /// The server could not be started.
    #[error("startup error: {source}")]
    Startup {
        /// The underlying startup error.
        #[from]
        source: itemstore_api::StartupError,
    },

    /// The server failed while running.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: itemstore_api::ServerError,
    },

    /// The server task panicked or was cancelled.
    #[error("server task failed: {message}")]
    Join {
        /// Description of the join failure.
        message: String,
    },
}
