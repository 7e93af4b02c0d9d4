//! Core of the Item Store service.
//!
//! - [`store`] -- The synchronized, position-indexed [`ItemStore`]
//! - [`config`] -- Typed configuration loaded from YAML with environment
//!   overrides

pub mod config;
pub mod store;

pub use config::{ConfigError, ServiceConfig};
pub use store::{ItemStore, StoreError};
