//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor is a single page that runs entirely in the browser; the server
//! hosts its static assets (page, wasm bundle, furniture and background
//! images) and the two normalised feeds it reads at startup.

pub mod feeds;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Feed and health routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/furniture.json", get(feeds::catalog))
        .route("/backgrounds.json", get(feeds::backgrounds))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application: feed routes first, everything else from `public_dir`.
pub fn app(state: AppState, public_dir: &Path) -> Router {
    let assets = ServeDir::new(public_dir).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(assets)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
