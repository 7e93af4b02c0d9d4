//! Error types for the Item Store API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! response body carries a `detail` key: a string for not-found, rejected
//! and internal errors, a list of [`FieldError`]s for validation failures.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use itemstore_core::StoreError;
use itemstore_types::{FieldError, ValidationErrors};
use serde::Serialize;
use utoipa::ToSchema;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The addressed index is outside the store.
    #[error(transparent)]
    NotFound(#[from] StoreError),

    /// The request failed validation before reaching the store.
    #[error("{}", ValidationErrors(.0.clone()))]
    Validation(Vec<FieldError>),

    /// The request was refused before validation, e.g. an oversized body
    /// (413) or a non-JSON media type (415).
    #[error("{message}")]
    Rejected {
        /// Status code to answer with.
        status: StatusCode,
        /// Human-readable reason.
        message: String,
    },

    /// An internal error occurred (static file I/O only).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Validation failures in the request body, located under `body`.
    pub fn body(errors: ValidationErrors) -> Self {
        Self::Validation(
            errors
                .into_inner()
                .into_iter()
                .map(|e| e.with_prefix("body"))
                .collect(),
        )
    }

    /// A single validation failure outside the body.
    pub fn field(error: FieldError) -> Self {
        Self::Validation(vec![error])
    }

    /// Merge the validation errors of `self` and `other`.
    ///
    /// Non-validation errors win over validation errors; `self` wins when
    /// both are non-validation.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Validation(mut first), Self::Validation(second)) => {
                first.extend(second);
                Self::Validation(first)
            }
            (Self::Validation(_), other) => other,
            (this, _) => this,
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Body of a 404 or 500 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DetailBody {
    /// What went wrong, e.g. `Item 3 not found`.
    pub detail: String,
}

/// Body of a 422 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    /// One entry per invalid value.
    pub detail: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(e) => (
                StatusCode::NOT_FOUND,
                axum::Json(DetailBody {
                    detail: e.to_string(),
                }),
            )
                .into_response(),
            Self::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                axum::Json(ValidationErrorBody { detail }),
            )
                .into_response(),
            Self::Rejected { status, message } => {
                (status, axum::Json(DetailBody { detail: message })).into_response()
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(DetailBody { detail: msg }),
                )
                    .into_response()
            }
        }
    }
}
