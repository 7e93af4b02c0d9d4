//! API documentation endpoints.
//!
//! The `OpenAPI` document is derived from the `#[utoipa::path]`
//! annotations on the handlers, then stamped with the configured title,
//! version and description. `GET /docs` renders a small HTML index of the
//! endpoints linking to `GET /openapi.json`.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::Html;
use itemstore_core::config::ApiConfig;
use utoipa::OpenApi;

use crate::state::AppState;

/// Compile-time part of the `OpenAPI` document.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::create_item,
        crate::handlers::list_items,
        crate::handlers::get_item,
        crate::handlers::update_item,
        crate::handlers::delete_item,
    ),
    tags((name = "items", description = "Position-indexed item operations"))
)]
pub struct ApiDoc;

/// Build the `OpenAPI` document for `config`.
pub fn openapi(config: &ApiConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title.clone_from(&config.title);
    doc.info.version.clone_from(&config.version);
    doc.info.description.clone_from(&config.description);
    doc
}

/// Serve the `OpenAPI` document as JSON.
pub async fn openapi_json(State(state): State<Arc<AppState>>) -> Json<utoipa::openapi::OpenApi> {
    Json(state.openapi.clone())
}

/// Serve a minimal HTML page listing the endpoints.
pub async fn docs_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let title = escape_html(&state.api.title);
    let version = escape_html(&state.api.version);
    let description = state
        .api
        .description
        .as_deref()
        .map(|d| format!("<p class=\"subtitle\">{}</p>", escape_html(d)))
        .unwrap_or_default();
    let limit = state.api.default_list_limit;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title} docs</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        table {{ border-collapse: collapse; width: 100%; }}
        td, th {{ border-bottom: 1px solid #30363d; padding: 0.4rem; text-align: left; }}
        .method {{ color: #7ee787; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p class="subtitle">version {version}</p>
    {description}

    <table>
        <tr><th>Method</th><th>Path</th><th>Description</th></tr>
        <tr><td class="method">GET</td><td>/</td><td>Greeting</td></tr>
        <tr><td class="method">POST</td><td>/items</td><td>Append an item; returns all items</td></tr>
        <tr><td class="method">GET</td><td>/items?limit=N</td><td>First N items (default {limit})</td></tr>
        <tr><td class="method">GET</td><td>/items/{{index}}</td><td>Item at a zero-based position</td></tr>
        <tr><td class="method">PUT</td><td>/items/{{index}}</td><td>Replace the item at a position</td></tr>
        <tr><td class="method">DELETE</td><td>/items/{{index}}</td><td>Remove the item at a position</td></tr>
    </table>

    <p>Item body: <code>{{"name": string, "description": string | null, "price": number}}</code></p>
    <p>Positions shift down after a delete; do not cache them across writes.</p>
    <p>Machine-readable schema: <a href="/openapi.json">/openapi.json</a></p>
</body>
</html>"#
    ))
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
