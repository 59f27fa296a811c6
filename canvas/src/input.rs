//! Input model: modifier keys, mouse buttons, selection, and the gesture state machine.
//!
//! `UiState` is what the renderer needs to know about the user's current
//! focus: the selected item and whether pan mode is on. `InputState` is the
//! gesture being tracked between pointer-down and pointer-up, carrying the
//! values captured at gesture start so each move can be computed from the
//! origin rather than accumulated.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ItemId;
use crate::geometry::Bounds;
use crate::hit::ResizeAnchor;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button; opens the context action on an item.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"r"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }

    #[must_use]
    pub fn is_rotate(&self) -> bool {
        self.0.eq_ignore_ascii_case("r")
    }
}

/// Selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Item(ItemId),
}

impl Selection {
    #[must_use]
    pub fn id(self) -> Option<ItemId> {
        match self {
            Self::None => None,
            Self::Item(id) => Some(id),
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selection: Selection,
    /// While on, dragging empty canvas pans the stage.
    pub pan_mode: bool,
}

/// Gesture in progress.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging empty canvas in pan mode.
    Panning {
        /// Viewport position of the previous pointer event.
        last_viewport: Point,
    },
    /// Moving an item.
    DraggingItem {
        id: ItemId,
        /// Logical pointer position at gesture start.
        start: Point,
        orig_x: f64,
        orig_y: f64,
    },
    /// Resizing an item from one of its corners.
    ResizingItem {
        id: ItemId,
        anchor: ResizeAnchor,
        /// Logical pointer position at gesture start.
        start: Point,
        /// Item origin at gesture start.
        orig_origin: Point,
        /// Item box at gesture start, in its local frame.
        orig_bounds: Bounds,
        rotation: f64,
    },
    /// Rotating an item with the rotate handle.
    RotatingItem {
        id: ItemId,
        /// Item center; the gesture pivot.
        center: Point,
        /// Pointer bearing from the center at gesture start.
        start_bearing: f64,
        orig_rotation: f64,
        width: f64,
        height: f64,
    },
}

impl InputState {
    /// Id of the item the gesture manipulates, if any.
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::Idle | Self::Panning { .. } => None,
            Self::DraggingItem { id, .. } | Self::ResizingItem { id, .. } | Self::RotatingItem { id, .. } => Some(*id),
        }
    }
}
