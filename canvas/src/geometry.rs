//! Grid, snapping, resize, and rotation math in logical space.
//!
//! Every function here is pure. Items are positioned by their top-left corner
//! and rotate about that same corner, so an item's local frame has its origin
//! at `(x, y)` and axes turned by `rotation` degrees clockwise.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::camera::{Point, Size};
use crate::consts::{ASPECT_EPSILON, MIN_ITEM_SIZE};

/// An axis-aligned box in an item's local (unrotated) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Width divided by height, or `1.0` for a degenerate box.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }
}

// ── Grid ────────────────────────────────────────────────────────

/// Logical grid spacing for a screen-pixel spacing at the given scale.
#[must_use]
pub fn grid_spacing(base_spacing_px: f64, effective_scale: f64) -> f64 {
    if effective_scale > 0.0 { base_spacing_px / effective_scale } else { base_spacing_px }
}

/// Round `value` to the nearest multiple of `spacing`.
#[must_use]
pub fn snap_to_grid(value: f64, spacing: f64) -> f64 {
    if spacing <= 0.0 {
        return value;
    }
    (value / spacing).round() * spacing
}

/// Line segments of a uniform lattice covering `extent`, verticals first.
#[must_use]
pub fn grid_lines(extent: Size, spacing: f64) -> Vec<(Point, Point)> {
    if spacing <= 0.0 || extent.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut i = 0.0_f64;
    while i * spacing <= extent.width {
        let x = i * spacing;
        lines.push((Point::new(x, 0.0), Point::new(x, extent.height)));
        i += 1.0;
    }
    i = 0.0;
    while i * spacing <= extent.height {
        let y = i * spacing;
        lines.push((Point::new(0.0, y), Point::new(extent.width, y)));
        i += 1.0;
    }
    lines
}

// ── Resize ──────────────────────────────────────────────────────

/// Constrain a proposed resize box to the original box's aspect ratio.
///
/// The proposed width is trusted and the height derived from it. When the
/// resulting box would drop below [`MIN_ITEM_SIZE`] on either axis the resize
/// is rejected and `old` is returned unchanged.
#[must_use]
pub fn resize_with_aspect_lock(old: Bounds, new: Bounds) -> Bounds {
    if new.width < MIN_ITEM_SIZE {
        return old;
    }
    let aspect = old.aspect();
    let sized = if (aspect - new.aspect()).abs() <= ASPECT_EPSILON {
        new
    } else {
        Bounds { height: new.width / aspect, ..new }
    };
    if sized.height < MIN_ITEM_SIZE { old } else { sized }
}

/// Resize an item by dragging one corner while the opposite corner stays put.
///
/// `origin` and `rotation` describe the item frame at gesture start, `orig`
/// its local box, and `local_delta` the pointer travel in that frame. The
/// axis that moved furthest (relative to its length) drives the new size.
/// Returns the new top-left origin and local box.
#[must_use]
pub fn drag_corner(
    origin: Point,
    rotation_deg: f64,
    orig: Bounds,
    moves_left: bool,
    moves_top: bool,
    local_delta: Point,
) -> (Point, Bounds) {
    let width = if moves_left { orig.width - local_delta.x } else { orig.width + local_delta.x };
    let height = if moves_top { orig.height - local_delta.y } else { orig.height + local_delta.y };

    let width_change = if orig.width > 0.0 { (width / orig.width - 1.0).abs() } else { 0.0 };
    let height_change = if orig.height > 0.0 { (height / orig.height - 1.0).abs() } else { 0.0 };
    let proposed_width = if height_change > width_change { height * orig.aspect() } else { width };

    let sized = resize_with_aspect_lock(orig, Bounds::new(0.0, 0.0, proposed_width, proposed_width / orig.aspect()));
    let shift = Point::new(
        if moves_left { orig.width - sized.width } else { 0.0 },
        if moves_top { orig.height - sized.height } else { 0.0 },
    );
    (to_world(origin, rotation_deg, shift), Bounds::new(0.0, 0.0, sized.width, sized.height))
}

// ── Rotation ────────────────────────────────────────────────────

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed shortest difference `a - b`, in `(-180, 180]`.
#[must_use]
pub fn angle_delta(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Advance `current` by a fixed `step`, wrapping at 360.
#[must_use]
pub fn rotate_snap(current_degrees: f64, step: f64) -> f64 {
    normalize_degrees(current_degrees + step)
}

/// Snap a free rotation to the nearest of `snaps` within `tolerance` degrees.
#[must_use]
pub fn snap_rotation(degrees: f64, snaps: &[f64], tolerance: f64) -> f64 {
    let deg = normalize_degrees(degrees);
    snaps
        .iter()
        .copied()
        .find(|snap| angle_delta(deg, *snap).abs() <= tolerance)
        .map_or(deg, normalize_degrees)
}

/// Clockwise angle of `point` around `pivot`, measured from straight up.
///
/// Matches screen coordinates (y grows downward): a point directly above the
/// pivot is 0°, directly to the right is 90°.
#[must_use]
pub fn bearing_deg(pivot: Point, point: Point) -> f64 {
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    normalize_degrees(dx.atan2(-dy).to_degrees())
}

/// Rotate a vector clockwise by `degrees` (screen coordinates).
#[must_use]
pub fn rotate_vec(v: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Convert a logical point into an item frame with the given origin and rotation.
#[must_use]
pub fn to_local(origin: Point, rotation_deg: f64, world: Point) -> Point {
    rotate_vec(Point::new(world.x - origin.x, world.y - origin.y), -rotation_deg)
}

/// Convert a point in an item frame back to logical space.
#[must_use]
pub fn to_world(origin: Point, rotation_deg: f64, local: Point) -> Point {
    let v = rotate_vec(local, rotation_deg);
    Point::new(origin.x + v.x, origin.y + v.y)
}
