//! Coordinate spaces: viewport, display, and logical.
//!
//! Pointer events arrive in viewport space (CSS pixels relative to the
//! container). The background is scaled to the container by a fit factor
//! (display space), and the scene's zoom is layered on top of that. Furniture
//! is stored in logical space, which matches the background's intrinsic
//! pixels, or the container's pixels when there is no background.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::BASE_GRID_SPACING_PX;
use crate::geometry;

/// A point in either viewport or logical space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative (not yet laid out).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// How a background image is scaled into the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Fill the container, clipping overflow.
    #[default]
    Cover,
    /// Fit entirely inside the container, letterboxing the rest.
    Contain,
}

impl FitMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Cover => Self::Contain,
            Self::Contain => Self::Cover,
        }
    }
}

/// Scale factor that maps the background into the container.
///
/// Returns `1.0` when there is no background or either size is empty, so the
/// logical canvas falls back to the container's own pixels.
#[must_use]
pub fn compute_fit_scale(container: Size, background: Option<Size>, mode: FitMode) -> f64 {
    let Some(bg) = background else {
        return 1.0;
    };
    if container.is_empty() || bg.is_empty() {
        return 1.0;
    }
    let sx = container.width / bg.width;
    let sy = container.height / bg.height;
    match mode {
        FitMode::Cover => sx.max(sy),
        FitMode::Contain => sx.min(sy),
    }
}

/// Viewport position of the stage's logical origin.
///
/// `cover` pins the background to the top-left corner; `contain` centers it.
#[must_use]
pub fn compute_stage_origin(mode: FitMode, container: Size, scaled_background: Size) -> Point {
    match mode {
        FitMode::Cover => Point::new(0.0, 0.0),
        FitMode::Contain => Point::new(
            (container.width - scaled_background.width) / 2.0,
            (container.height - scaled_background.height) / 2.0,
        ),
    }
}

/// Map a pointer position to logical space: `(pointer - origin) / scale`.
///
/// A non-positive scale leaves the offset unscaled.
#[must_use]
pub fn pointer_to_logical(pointer: Point, container_origin: Point, zoom_scale: f64) -> Point {
    let dx = pointer.x - container_origin.x;
    let dy = pointer.y - container_origin.y;
    if zoom_scale > 0.0 {
        Point::new(dx / zoom_scale, dy / zoom_scale)
    } else {
        Point::new(dx, dy)
    }
}

/// The stage transform for one layout pass.
///
/// `origin_x` / `origin_y` are in viewport pixels and already include any
/// user pan offset. The effective scale applied when drawing is
/// `zoom * fit_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub fit_scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    /// Extent of the logical canvas (background size, or container size).
    pub logical: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0, fit_scale: 1.0, origin_x: 0.0, origin_y: 0.0, logical: Size::default() }
    }
}

impl Camera {
    /// Lay out the stage for a container. Returns `None` until the container
    /// has a nonzero size.
    #[must_use]
    pub fn layout(container: Size, background: Option<Size>, mode: FitMode, zoom: f64, pan: Point) -> Option<Self> {
        if container.is_empty() {
            return None;
        }
        let background = background.filter(|bg| !bg.is_empty());
        let Some(bg) = background else {
            return Some(Self { zoom, fit_scale: 1.0, origin_x: pan.x, origin_y: pan.y, logical: container });
        };
        let fit_scale = compute_fit_scale(container, Some(bg), mode);
        let scaled = Size::new(bg.width * fit_scale, bg.height * fit_scale);
        let origin = compute_stage_origin(mode, container, scaled);
        Some(Self { zoom, fit_scale, origin_x: origin.x + pan.x, origin_y: origin.y + pan.y, logical: bg })
    }

    /// Combined zoom and fit factor.
    #[must_use]
    pub fn effective_scale(&self) -> f64 {
        self.zoom * self.fit_scale
    }

    /// Convert a viewport point (CSS pixels) to logical coordinates.
    #[must_use]
    pub fn viewport_to_logical(&self, viewport: Point) -> Point {
        pointer_to_logical(viewport, Point::new(self.origin_x, self.origin_y), self.effective_scale())
    }

    /// Convert a logical point to viewport coordinates (CSS pixels).
    #[must_use]
    pub fn logical_to_viewport(&self, logical: Point) -> Point {
        let s = self.effective_scale();
        Point::new(logical.x * s + self.origin_x, logical.y * s + self.origin_y)
    }

    /// Convert a viewport distance (pixels) to a logical distance.
    #[must_use]
    pub fn screen_dist_to_logical(&self, screen_dist: f64) -> f64 {
        let s = self.effective_scale();
        if s > 0.0 { screen_dist / s } else { screen_dist }
    }

    /// Logical spacing between grid lines at the current scale.
    #[must_use]
    pub fn grid_spacing(&self) -> f64 {
        geometry::grid_spacing(BASE_GRID_SPACING_PX, self.effective_scale())
    }
}
