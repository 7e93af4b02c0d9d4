//! The [`Item`] record.
//!
//! An item is the only resource the service manages. Items carry no
//! identifier of their own: callers address them by their zero-based
//! position in the store, which shifts whenever an earlier item is
//! deleted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// A single item record.
///
/// `description` is always serialized, as `null` when absent, so every
/// response carries the same three keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "bindings/")]
pub struct Item {
    /// Display name. Emptiness is not checked.
    pub name: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price.
    pub price: f64,
}

impl Item {
    /// Create an item without a description.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
        }
    }

    /// Attach a description, consuming and returning the item.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn absent_description_serializes_as_null() {
        let item = Item::new("Widget", 2.5);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["description"].is_null());
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["price"], 2.5);
    }

    #[test]
    fn description_round_trips() {
        let item = Item::new("Widget", 1.0).with_description("blue");
        let text = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&text).unwrap();
        assert_eq!(back, item);
    }
}
