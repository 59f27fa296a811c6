//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! feeds are loaded once at startup and never mutated, so they are shared
//! behind `Arc` without locking.

use std::sync::Arc;

use canvas::catalog::{BackgroundFeed, Catalog};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub backgrounds: Arc<BackgroundFeed>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, backgrounds: BackgroundFeed) -> Self {
        Self { catalog: Arc::new(catalog), backgrounds: Arc::new(backgrounds) }
    }
}
