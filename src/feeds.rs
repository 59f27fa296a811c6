//! Loading the furniture catalog and background feeds from disk.
//!
//! Feeds are read once at startup and served normalised: entries that could
//! never be placed (non-positive or non-finite sizes) are dropped, and a
//! missing or malformed file becomes an empty feed with a warning. The
//! editor therefore always receives a well-formed document.

use std::path::{Path, PathBuf};

use canvas::catalog::{BackgroundFeed, Catalog};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("cannot read feed {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed feed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

async fn read_feed<T: DeserializeOwned>(path: &Path) -> Result<T, FeedError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FeedError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| FeedError::Parse { path: path.to_path_buf(), source })
}

fn placeable(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

/// Drop catalog entries with unusable sizes.
#[must_use]
pub fn normalize_catalog(mut catalog: Catalog) -> Catalog {
    for category in &mut catalog.categories {
        let before = category.furniture.len();
        category.furniture.retain(|entry| placeable(entry.width, entry.height));
        let dropped = before - category.furniture.len();
        if dropped > 0 {
            tracing::warn!(category = %category.id, dropped, "skipping catalog entries with invalid size");
        }
    }
    catalog
}

/// Drop backgrounds with unusable sizes.
#[must_use]
pub fn normalize_backgrounds(mut feed: BackgroundFeed) -> BackgroundFeed {
    let before = feed.backgrounds.len();
    feed.backgrounds.retain(|bg| placeable(bg.width, bg.height));
    let dropped = before - feed.backgrounds.len();
    if dropped > 0 {
        tracing::warn!(dropped, "skipping backgrounds with invalid size");
    }
    feed
}

/// Read and normalise the furniture catalog.
///
/// # Errors
///
/// [`FeedError`] if the file cannot be read or parsed.
pub async fn read_catalog(path: &Path) -> Result<Catalog, FeedError> {
    read_feed(path).await.map(normalize_catalog)
}

/// Read and normalise the background feed.
///
/// # Errors
///
/// [`FeedError`] if the file cannot be read or parsed.
pub async fn read_backgrounds(path: &Path) -> Result<BackgroundFeed, FeedError> {
    read_feed(path).await.map(normalize_backgrounds)
}

/// Load the catalog, falling back to an empty one.
pub async fn load_catalog(path: &Path) -> Catalog {
    match read_catalog(path).await {
        Ok(catalog) => {
            tracing::info!(path = %path.display(), entries = catalog.len(), "furniture catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::warn!(error = %e, "furniture catalog unavailable, serving empty catalog");
            Catalog::default()
        }
    }
}

/// Load the background feed, falling back to an empty one.
pub async fn load_backgrounds(path: &Path) -> BackgroundFeed {
    match read_backgrounds(path).await {
        Ok(feed) => {
            tracing::info!(path = %path.display(), backgrounds = feed.backgrounds.len(), "background feed loaded");
            feed
        }
        Err(e) => {
            tracing::warn!(error = %e, "background feed unavailable, serving empty list");
            BackgroundFeed::default()
        }
    }
}

#[cfg(test)]
#[path = "feeds_test.rs"]
mod tests;
