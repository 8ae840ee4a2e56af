use axum::{routing::get, Json, Router};

use crate::application::dispatcher::TOOL_NAMES;

/// Wraps the tool router with the service-level routes: `/health` and the
/// `/tools` name listing.
pub fn app(tools: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/tools", get(|| async { Json(TOOL_NAMES) }))
        .merge(tools)
}
