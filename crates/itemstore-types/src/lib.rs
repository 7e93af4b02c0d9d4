//! Shared wire types for the Item Store service.
//!
//! This crate is the single source of truth for the JSON shapes that cross
//! the HTTP boundary. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` and into the `OpenAPI` document via `utoipa`.
//!
//! # Modules
//!
//! - [`item`] -- The [`Item`] record held by the store
//! - [`validation`] -- Explicit schema validation of untyped JSON bodies

pub mod item;
pub mod validation;

// Re-export all public types at crate root for convenience.
pub use item::Item;
pub use validation::{FieldError, ValidationErrors};
