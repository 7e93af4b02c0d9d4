//! REST API endpoint handlers for the Item Store.
//!
//! Every handler validates its inputs explicitly before touching the
//! store, so a malformed request never takes the store lock.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Greeting |
//! | `POST` | `/items` | Append an item, return all items |
//! | `GET` | `/items` | First `limit` items |
//! | `GET` | `/items/{index}` | Item at a position |
//! | `PUT` | `/items/{index}` | Replace the item at a position |
//! | `DELETE` | `/items/{index}` | Remove the item at a position |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use itemstore_types::{FieldError, Item};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{ApiError, DetailBody, ValidationErrorBody};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /items` endpoint.
///
/// `limit` is kept as text so a non-integer value produces a structured
/// validation error. A query string that does not deserialize at all (a
/// repeated `limit`, say) is reported the same way.
#[derive(Debug, serde::Deserialize)]
pub struct ListQuery {
    /// Maximum number of items to return.
    pub limit: Option<String>,
}

/// Response body for `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct Greeting {
    /// Always `World`.
    #[serde(rename = "Hello")]
    pub hello: String,
    /// Location of the API docs, present when docs are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// Response body for `DELETE /items/{index}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct Deleted {
    /// Confirmation, e.g. `Item 0 deleted`.
    pub message: String,
    /// The removed item.
    pub item: Item,
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Static acknowledgement.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = Greeting))
)]
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Greeting> {
    Json(Greeting {
        hello: String::from("World"),
        docs: state.api.docs_enabled.then(|| String::from("/docs")),
    })
}

// ---------------------------------------------------------------------------
// POST /items
// ---------------------------------------------------------------------------

/// Append an item to the end of the store.
///
/// Returns every item currently stored; the new item is last, at index
/// `len - 1`.
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = Item,
    responses(
        (status = 200, description = "All items after the append", body = Vec<Item>),
        (status = 422, description = "Body failed validation", body = ValidationErrorBody)
    )
)]
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let item = parse_item(&headers, body)?;
    Ok(Json(state.store.create(item).await))
}

// ---------------------------------------------------------------------------
// GET /items
// ---------------------------------------------------------------------------

/// List the first `limit` items in insertion order.
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of items (default from config, 10)")
    ),
    responses(
        (status = 200, description = "Up to `limit` items", body = Vec<Item>),
        (status = 422, description = "`limit` is negative or not an integer", body = ValidationErrorBody)
    )
)]
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected query string");
        ApiError::field(FieldError::new(
            &["query", "limit"],
            "value_error",
            &rejection.body_text(),
        ))
    })?;
    let limit = match params.limit.as_deref() {
        None => state.api.default_list_limit,
        Some(raw) => parse_limit(raw)?,
    };
    Ok(Json(state.store.list(limit).await))
}

// ---------------------------------------------------------------------------
// GET /items/{index}
// ---------------------------------------------------------------------------

/// Return the item at `index`.
#[utoipa::path(
    get,
    path = "/items/{index}",
    tag = "items",
    params(("index" = i64, Path, description = "Zero-based position in the store")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "Index out of range", body = DetailBody),
        (status = 422, description = "Index is not an integer", body = ValidationErrorBody)
    )
)]
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
    let index = path_index(path)?;
    Ok(Json(state.store.get(index).await?))
}

// ---------------------------------------------------------------------------
// PUT /items/{index}
// ---------------------------------------------------------------------------

/// Replace the item at `index` and return the replacement.
#[utoipa::path(
    put,
    path = "/items/{index}",
    tag = "items",
    request_body = Item,
    params(("index" = i64, Path, description = "Zero-based position in the store")),
    responses(
        (status = 200, description = "The replacement item", body = Item),
        (status = 404, description = "Index out of range", body = DetailBody),
        (status = 422, description = "Index or body failed validation", body = ValidationErrorBody)
    )
)]
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Item>, ApiError> {
    let (index, item) = match (path_index(path), parse_item(&headers, body)) {
        (Ok(index), Ok(item)) => (index, item),
        (Err(path_err), Err(body_err)) => return Err(path_err.merge(body_err)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => return Err(e),
    };
    Ok(Json(state.store.update(index, item).await?))
}

// ---------------------------------------------------------------------------
// DELETE /items/{index}
// ---------------------------------------------------------------------------

/// Remove the item at `index`. Later items shift down by one.
#[utoipa::path(
    delete,
    path = "/items/{index}",
    tag = "items",
    params(("index" = i64, Path, description = "Zero-based position in the store")),
    responses(
        (status = 200, description = "The removed item", body = Deleted),
        (status = 404, description = "Index out of range", body = DetailBody),
        (status = 422, description = "Index is not an integer", body = ValidationErrorBody)
    )
)]
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let index = path_index(path)?;
    let item = state.store.delete(index).await?;
    Ok(Json(Deleted {
        message: format!("Item {index} deleted"),
        item,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_item(headers: &HeaderMap, body: Result<Bytes, BytesRejection>) -> Result<Item, ApiError> {
    let value = parse_body(headers, &body?)?;
    Item::from_json(&value).map_err(|e| {
        tracing::debug!(error = %e, "rejected item body");
        ApiError::body(e)
    })
}

/// Decode a JSON request body.
///
/// A request without a `Content-Type` header is decoded as JSON anyway;
/// any other non-JSON media type is refused with 415.
fn parse_body(headers: &HeaderMap, bytes: &[u8]) -> Result<Value, ApiError> {
    if headers
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| !is_json(value))
    {
        return Err(ApiError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: String::from("Expected request with `Content-Type: application/json`"),
        });
    }

    if bytes.is_empty() {
        return Err(ApiError::field(FieldError::new(
            &["body"],
            "missing",
            "Field required",
        )));
    }

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, "rejected request body");
        ApiError::field(FieldError::new(
            &["body"],
            "json_invalid",
            &format!("JSON decode error: {e}"),
        ))
    })
}

/// `application/json` or any `application/*+json` type, parameters ignored.
fn is_json(value: &HeaderValue) -> bool {
    value.to_str().is_ok_and(|raw| {
        let essence = raw
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "application/json"
            || (essence.starts_with("application/") && essence.ends_with("+json"))
    })
}

/// Extract the path index. A segment that cannot even be decoded (invalid
/// UTF-8 after percent-decoding) is reported like any other non-integer.
fn path_index(path: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    let Path(raw) = path.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected path");
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => {
                ApiError::field(FieldError::int_parsing(&["path", "index"]))
            }
            other => ApiError::Internal(other.body_text()),
        }
    })?;
    parse_index(&raw)
}

/// Parse a path index. Negative values parse fine and are left for the
/// store to reject as not found.
fn parse_index(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|e| {
        tracing::debug!(error = %e, raw, "rejected path index");
        ApiError::field(FieldError::int_parsing(&["path", "index"]))
    })
}

fn parse_limit(raw: &str) -> Result<usize, ApiError> {
    let limit = raw.trim().parse::<i64>().map_err(|e| {
        tracing::debug!(error = %e, raw, "rejected limit");
        ApiError::field(FieldError::int_parsing(&["query", "limit"]))
    })?;

    if limit < 0 {
        return Err(ApiError::field(FieldError::new(
            &["query", "limit"],
            "greater_than_equal",
            "Input should be greater than or equal to 0",
        )));
    }

    // Only fails on targets where usize is narrower than i64.
    Ok(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kind(err: &ApiError) -> Option<&str> {
        match err {
            ApiError::Validation(errors) => errors.first().map(|e| e.kind.as_str()),
            _ => None,
        }
    }

    #[test]
    fn parse_index_accepts_integers() {
        assert_eq!(parse_index("0").unwrap(), 0);
        assert_eq!(parse_index("17").unwrap(), 17);
        assert_eq!(parse_index("-3").unwrap(), -3);
    }

    #[test]
    fn parse_index_rejects_non_integers() {
        for raw in ["abc", "1.5", "", "0x10"] {
            assert_eq!(kind(&parse_index(raw).unwrap_err()), Some("int_parsing"));
        }
    }

    #[test]
    fn parse_body_without_content_type_is_json() {
        let value = parse_body(&HeaderMap::new(), br#"{"name":"A","price":1}"#).unwrap();
        assert_eq!(value["name"], "A");
    }

    #[test]
    fn parse_body_rejects_other_media_types() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let err = parse_body(&headers, b"{}").unwrap_err();
        assert!(matches!(
            err,
            ApiError::Rejected { status, .. } if status == StatusCode::UNSUPPORTED_MEDIA_TYPE
        ));
    }

    #[test]
    fn parse_body_empty_is_missing() {
        let err = parse_body(&HeaderMap::new(), b"").unwrap_err();
        assert_eq!(kind(&err), Some("missing"));
    }

    #[test]
    fn json_media_types() {
        for raw in [
            "application/json",
            "application/json; charset=utf-8",
            "Application/JSON",
            "application/merge-patch+json",
        ] {
            assert!(is_json(&HeaderValue::from_static(raw)), "{raw}");
        }
        for raw in ["text/plain", "application/xml", "multipart/form-data"] {
            assert!(!is_json(&HeaderValue::from_static(raw)), "{raw}");
        }
    }

    #[test]
    fn parse_limit_rules() {
        assert_eq!(parse_limit("0").unwrap(), 0);
        assert_eq!(parse_limit("25").unwrap(), 25);
        assert_eq!(
            kind(&parse_limit("-1").unwrap_err()),
            Some("greater_than_equal")
        );
        assert_eq!(kind(&parse_limit("ten").unwrap_err()), Some("int_parsing"));
    }
}
