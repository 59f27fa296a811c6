//! Read-only feeds: the furniture catalog, predefined backgrounds, and the
//! drag payload a catalog entry hands to the canvas.
//!
//! Feeds are fetched once by the host. A missing or malformed feed degrades
//! to an empty list (see [`Catalog::parse_or_empty`]); a malformed drag
//! payload is reported as a [`PayloadError`] and the drop is skipped.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

use crate::doc::Background;

/// The fields a new furniture item is instantiated from.
///
/// This is also the drag payload: it is serialized as JSON text when a drag
/// starts and parsed back at drop time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureTemplate {
    pub name: String,
    pub image: String,
    pub width: f64,
    pub height: f64,
}

/// Drag payload errors.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("malformed drag payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("drag payload has non-positive size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

impl FurnitureTemplate {
    /// Parse a drag payload produced by [`FurnitureTemplate::to_payload`].
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] if the text is not a template or its size is
    /// not positive and finite.
    pub fn from_payload(text: &str) -> Result<Self, PayloadError> {
        let template: Self = serde_json::from_str(text)?;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(template.width) || !valid(template.height) {
            return Err(PayloadError::InvalidSize { width: template.width, height: template.height });
        }
        Ok(template)
    }

    /// Serialize as drag payload text.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Malformed`] if serialization fails.
    pub fn to_payload(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One draggable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub image: String,
    pub width: f64,
    pub height: f64,
}

impl CatalogEntry {
    #[must_use]
    pub fn template(&self) -> FurnitureTemplate {
        FurnitureTemplate {
            name: self.name.clone(),
            image: self.image.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// A named group of catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub furniture: Vec<CatalogEntry>,
}

/// The furniture catalog feed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Parse a catalog document, logging and returning an empty catalog on failure.
    #[must_use]
    pub fn parse_or_empty(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("furniture catalog unreadable, continuing empty: {e}");
                Self::default()
            }
        }
    }

    /// Find an entry by id across all categories.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.furniture.iter())
            .find(|e| e.id == id)
    }

    /// Total number of entries across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.furniture.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The predefined background feed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFeed {
    #[serde(default)]
    pub backgrounds: Vec<Background>,
}

impl BackgroundFeed {
    /// Parse a background feed, logging and returning an empty feed on failure.
    #[must_use]
    pub fn parse_or_empty(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(feed) => feed,
            Err(e) => {
                log::error!("background feed unreadable, continuing empty: {e}");
                Self::default()
            }
        }
    }
}
