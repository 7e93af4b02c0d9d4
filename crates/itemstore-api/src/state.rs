//! Shared application state for the Item Store API.
//!
//! [`AppState`] owns the [`ItemStore`] plus the configuration sections the
//! handlers need. It is wrapped in [`Arc`] and injected via Axum's
//! `State` extractor; nothing is held in a global.

use std::sync::Arc;

use itemstore_core::config::{ApiConfig, StaticFilesConfig};
use itemstore_core::{ItemStore, ServiceConfig};
use utoipa::openapi::OpenApi;

use crate::docs;

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The item store shared by every request.
    pub store: Arc<ItemStore>,
    /// API metadata and request defaults.
    pub api: ApiConfig,
    /// Static directory and favicon settings.
    pub static_files: StaticFilesConfig,
    /// `OpenAPI` document with title and version taken from `api`.
    pub openapi: OpenApi,
}

impl AppState {
    /// Create application state with an empty store.
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(ItemStore::new()))
    }

    /// Create application state around an existing store.
    pub fn with_store(config: &ServiceConfig, store: Arc<ItemStore>) -> Self {
        Self {
            store,
            api: config.api.clone(),
            static_files: config.static_files.clone(),
            openapi: docs::openapi(&config.api),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ServiceConfig::default())
    }
}
