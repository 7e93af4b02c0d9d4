//! HTTP API for the Item Store service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Item endpoints** (`/items`, `/items/{index}`) for create, list,
//!   get, update and delete over the shared [`ItemStore`]
//! - **Greeting** (`GET /`) advertising the docs location
//! - **Docs** (`GET /docs`, `GET /openapi.json`) generated from the
//!   handler annotations with `utoipa`
//! - **Static files** (`GET /favicon.ico`, `GET /static/...`) served from
//!   the configured directory
//!
//! # Architecture
//!
//! Handlers receive an [`AppState`] through Axum's `State` extractor. The
//! state owns the store; there is no process-wide singleton, so tests
//! build isolated routers with their own stores.
//!
//! [`ItemStore`]: itemstore_core::ItemStore

pub mod docs;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod static_files;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, serve, start_server};
pub use startup::{StartupError, spawn_server};
pub use state::AppState;
