//! Favicon and static directory serving.
//!
//! This is a thin wrapper around `tower-http`'s file services. The only
//! behaviour of its own is creating an empty `favicon.ico` placeholder the
//! first time it is requested, when the file is missing and
//! `static_files.create_missing_favicon` is enabled.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Serve `favicon.ico` from the static directory.
pub async fn favicon(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, ApiError> {
    let path = state.static_files.favicon_path();

    if state.static_files.create_missing_favicon {
        ensure_placeholder(&path).await.map_err(|e| {
            ApiError::Internal(format!(
                "cannot create favicon placeholder at {}: {e}",
                path.display()
            ))
        })?;
    }

    let response = ServeFile::new(&path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    Ok(response.map(Body::new))
}

/// Service for everything under `/static`.
pub fn static_dir_service(dir: &Path) -> ServeDir {
    ServeDir::new(dir)
}

/// Create an empty file at `path` (and its parent directories) unless one
/// already exists.
///
/// Returns `true` when the placeholder was created by this call.
pub async fn ensure_placeholder(path: &Path) -> std::io::Result<bool> {
    if tokio::fs::try_exists(path).await? {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    // create_new keeps two concurrent first requests from racing.
    match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(_) => {
            info!(path = %path.display(), "created empty favicon placeholder");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e),
    }
}
