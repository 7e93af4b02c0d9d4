//! Explicit schema validation for [`Item`] request bodies.
//!
//! Request bodies are parsed into an untyped [`serde_json::Value`] first and
//! then checked field by field here, so a client always receives every
//! problem with its body in one response instead of the first serde error.
//!
//! Coercion is deliberately lax where clients commonly send strings:
//! `price` accepts a JSON number or a string holding a finite number.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::item::Item;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "bindings/")]
pub struct FieldError {
    /// Path to the offending value, outermost segment first
    /// (e.g. `["body", "price"]`).
    pub loc: Vec<String>,
    /// Human-readable message.
    pub msg: String,
    /// Machine-readable error kind (e.g. `missing`, `float_parsing`).
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Build an error for the value at `loc`.
    pub fn new(loc: &[&str], kind: &str, msg: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| (*s).to_owned()).collect(),
            msg: msg.to_owned(),
            kind: kind.to_owned(),
        }
    }

    /// A required field was not supplied.
    pub fn missing(field: &str) -> Self {
        Self::new(&[field], "missing", "Field required")
    }

    /// A field that must be a string held something else.
    pub fn string_type(field: &str) -> Self {
        Self::new(&[field], "string_type", "Input should be a valid string")
    }

    /// A field that must be numeric held a non-numeric, non-string value.
    pub fn float_type(field: &str) -> Self {
        Self::new(&[field], "float_type", "Input should be a valid number")
    }

    /// A numeric field held a string that does not parse as a number.
    pub fn float_parsing(field: &str) -> Self {
        Self::new(
            &[field],
            "float_parsing",
            "Input should be a valid number, unable to parse string as a number",
        )
    }

    /// An integer parameter held a value that does not parse as an integer.
    pub fn int_parsing(loc: &[&str]) -> Self {
        Self::new(
            loc,
            "int_parsing",
            "Input should be a valid integer, unable to parse string as an integer",
        )
    }

    /// Prepend `segment` to this error's location.
    #[must_use]
    pub fn with_prefix(mut self, segment: &str) -> Self {
        self.loc.insert(0, segment.to_owned());
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loc.join("."), self.msg)
    }
}

/// Every validation failure found in one request body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} validation error(s) for Item: {}", .0.len(), display_list(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// The collected field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Consume and return the collected field errors.
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

fn display_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Item {
    /// Validate an untyped JSON body and convert it into an [`Item`].
    ///
    /// Unknown keys are ignored. All fields are checked before returning,
    /// so the error lists every problem in the body.
    pub fn from_json(value: &Value) -> Result<Self, ValidationErrors> {
        let Some(fields) = value.as_object() else {
            return Err(ValidationErrors(vec![FieldError::new(
                &[],
                "model_attributes_type",
                "Input should be a valid dictionary or object to extract fields from",
            )]));
        };

        let mut errors = Vec::new();
        let name = required_string(fields, "name", &mut errors);
        let description = optional_string(fields, "description", &mut errors);
        let price = required_float(fields, "price", &mut errors);

        match (name, price) {
            (Some(name), Some(price)) if errors.is_empty() => Ok(Self {
                name,
                description,
                price,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn required_string(
    fields: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(key) {
        None => {
            errors.push(FieldError::missing(key));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::string_type(key));
            None
        }
    }
}

fn optional_string(
    fields: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::string_type(key));
            None
        }
    }
}

fn required_float(
    fields: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let parsed = match fields.get(key) {
        None => Err(FieldError::missing(key)),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| FieldError::float_type(key)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FieldError::float_parsing(key)),
        Some(_) => Err(FieldError::float_type(key)),
    };

    match parsed {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}
