//! Feed endpoints consumed by the editor's catalog and background panels.

use axum::extract::State;
use axum::response::Json;
use canvas::catalog::{BackgroundFeed, Catalog};

use crate::state::AppState;

/// `GET /furniture.json`
pub async fn catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(Catalog::clone(&state.catalog))
}

/// `GET /backgrounds.json`
pub async fn backgrounds(State(state): State<AppState>) -> Json<BackgroundFeed> {
    Json(BackgroundFeed::clone(&state.backgrounds))
}

#[cfg(test)]
#[path = "feeds_test.rs"]
mod tests;
