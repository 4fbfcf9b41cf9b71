//! Route registration — module routes + system endpoints + the web page.

use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

/// Build the complete router.
///
/// Module routes use absolute paths and are merged at the root; system
/// endpoints (`/health`, `/version`) and the embedded UI page sit beside
/// them.
pub fn build_router(module_routes: Vec<Router>) -> Router {
    let mut app = Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/version", get(version));

    for router in module_routes {
        app = app.merge(router);
    }

    app
}

async fn index_page() -> impl IntoResponse {
    Html(include_str!("web/index.html"))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "stockroomd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
