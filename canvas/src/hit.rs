#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{FurnitureItem, ItemId, Scene};
use crate::geometry;

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    RotateHandle,
}

/// Corner handles. Edge handles are not offered, so every resize keeps the
/// item's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    Nw,
    Ne,
    Se,
    Sw,
}

impl ResizeAnchor {
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Se, Self::Sw];

    /// Position of this corner in the item's local frame.
    #[must_use]
    pub fn local_point(self, width: f64, height: f64) -> Point {
        match self {
            Self::Nw => Point::new(0.0, 0.0),
            Self::Ne => Point::new(width, 0.0),
            Self::Se => Point::new(width, height),
            Self::Sw => Point::new(0.0, height),
        }
    }

    /// Whether dragging this corner moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// Whether dragging this corner moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    /// CSS cursor shown while hovering or dragging this corner.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// Logical position of the rotate handle, centered above the top edge.
#[must_use]
pub fn rotate_handle_point(item: &FurnitureItem, camera: &Camera) -> Point {
    let offset = camera.screen_dist_to_logical(ROTATE_HANDLE_OFFSET_PX);
    geometry::to_world(item.origin(), item.rotation, Point::new(item.width / 2.0, -offset))
}

/// Logical position of a resize corner.
#[must_use]
pub fn corner_point(item: &FurnitureItem, anchor: ResizeAnchor) -> Point {
    geometry::to_world(item.origin(), item.rotation, anchor.local_point(item.width, item.height))
}

/// Test which item (if any) is under `logical_pt`.
///
/// The selected item's handles are checked first, then item bodies from the
/// top of the paint order down.
#[must_use]
pub fn hit_test(logical_pt: Point, scene: &Scene, camera: &Camera, selected_id: Option<ItemId>) -> Option<Hit> {
    let slop = camera.screen_dist_to_logical(HANDLE_RADIUS_PX);

    if let Some(item) = selected_id.and_then(|id| scene.item(&id)) {
        if distance(logical_pt, rotate_handle_point(item, camera)) <= slop {
            return Some(Hit { item_id: item.id, part: HitPart::RotateHandle });
        }
        for anchor in ResizeAnchor::ALL {
            if distance(logical_pt, corner_point(item, anchor)) <= slop {
                return Some(Hit { item_id: item.id, part: HitPart::ResizeHandle(anchor) });
            }
        }
    }

    scene
        .furniture
        .iter()
        .rev()
        .find(|item| item.contains(logical_pt))
        .map(|item| Hit { item_id: item.id, part: HitPart::Body })
}

fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
