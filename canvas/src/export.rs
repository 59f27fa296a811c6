//! Raster export planning: validation, output size, and filename.
//!
//! The pixels themselves come from the renderer; this module only decides
//! whether an export may happen and what it should produce.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use crate::camera::Size;
use crate::consts::{EXPORT_FILE_PREFIX, EXPORT_PIXEL_RATIO};
use crate::doc::Scene;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("add furniture to the canvas before exporting")]
    EmptyScene,
    #[error("canvas has no size to export")]
    NoCanvas,
    #[error("raster export failed: {0}")]
    Raster(String),
}

/// What a raster export should produce.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    /// Logical extent being exported.
    pub logical: Size,
    pub pixel_ratio: f64,
    pub filename: String,
}

impl ExportPlan {
    /// Output bitmap size in device pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.logical.width * self.pixel_ratio).round().max(1.0) as u32,
            (self.logical.height * self.pixel_ratio).round().max(1.0) as u32,
        )
    }
}

/// Validate and plan an export of `scene` over its logical extent.
///
/// # Errors
///
/// [`ExportError::EmptyScene`] when the scene has no furniture,
/// [`ExportError::NoCanvas`] when the extent is not laid out yet.
pub fn plan_export(scene: &Scene, logical: Size, now_ms: f64) -> Result<ExportPlan, ExportError> {
    if scene.furniture.is_empty() {
        return Err(ExportError::EmptyScene);
    }
    if logical.is_empty() {
        return Err(ExportError::NoCanvas);
    }
    Ok(ExportPlan { logical, pixel_ratio: EXPORT_PIXEL_RATIO, filename: export_filename(now_ms) })
}

/// Timestamped download name, e.g. `roomboard-1700000000000.png`.
#[must_use]
pub fn export_filename(now_ms: f64) -> String {
    format!("{EXPORT_FILE_PREFIX}-{:.0}.png", now_ms.max(0.0).floor())
}
