//! Axum router construction for the Item Store API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{docs, handlers, static_files};

/// Build the complete Axum router for the Item Store.
///
/// The router includes:
/// - `GET /` -- greeting
/// - `POST /items`, `GET /items` -- create and list
/// - `GET|PUT|DELETE /items/{index}` -- positional get, update, delete
/// - `GET /favicon.ico` and `GET /static/*` -- static files
/// - `GET /docs`, `GET /openapi.json` -- only when docs are enabled
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/items/{index}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/favicon.ico", get(static_files::favicon))
        .nest_service(
            "/static",
            static_files::static_dir_service(&state.static_files.dir),
        );

    if state.api.docs_enabled {
        router = router
            .route("/docs", get(docs::docs_page))
            .route("/openapi.json", get(docs::openapi_json));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
