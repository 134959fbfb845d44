use std::path::Path;

use axum::{handler::HandlerWithoutStateExt, Router};
use tower_http::services::ServeDir;

use crate::web;

/// Serve files from `dir` for requests no route matched. Misses and
/// non-GET methods fall through to the unknown-endpoint handler.
pub fn with_static_files(router: Router, dir: &Path) -> Router {
    if !dir.is_dir() {
        tracing::warn!(
            "Static directory {} does not exist, only API routes are served",
            dir.display()
        );
    }

    let files = ServeDir::new(dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(web::unknown_endpoint.into_service());
    router.fallback_service(files)
}
