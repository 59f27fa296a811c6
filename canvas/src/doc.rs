//! Document model: scenes, furniture items, backgrounds, and the scene store.
//!
//! This module defines what is on the canvas (`FurnitureItem`), the saved
//! layouts that own those items (`Scene`), the shared backdrops scenes point
//! at (`Background`), and the runtime collection that tracks which scene is
//! active (`SceneStore`).
//!
//! Items are values: every edit produces a new `FurnitureItem` that replaces
//! the old one by id, so nothing downstream can observe a half-applied
//! mutation. Furniture order inside a scene is paint order, back to front.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Size};
use crate::catalog::FurnitureTemplate;
use crate::consts::{MIN_ITEM_SIZE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::geometry::{self, Bounds};

/// Unique identifier for a scene.
pub type SceneId = Uuid;

/// Unique identifier for a furniture item.
pub type ItemId = Uuid;

/// Scene collection errors. All of them leave the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    #[error("cannot delete the only remaining scene")]
    LastScene,
    #[error("scene not found: {0}")]
    UnknownScene(SceneId),
}

// =============================================================================
// BACKGROUND
// =============================================================================

/// A backdrop image. Its intrinsic size defines a scene's logical space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub id: String,
    pub name: String,
    /// Asset URL, or an embedded data URL for uploads.
    pub image: String,
    pub width: f64,
    pub height: f64,
    /// True for user-supplied images, false for feed-provided ones.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_uploaded: bool,
}

impl Background {
    /// Build a user-uploaded background with a fresh id.
    #[must_use]
    pub fn uploaded(name: impl Into<String>, image: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: format!("uploaded-{}", Uuid::new_v4()),
            name: name.into(),
            image: image.into(),
            width,
            height,
            is_uploaded: true,
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// =============================================================================
// FURNITURE ITEM
// =============================================================================

/// A placed furniture image inside a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureItem {
    pub id: ItemId,
    pub name: String,
    pub image: String,
    /// Left edge in logical coordinates; also the rotation pivot.
    pub x: f64,
    /// Top edge in logical coordinates; also the rotation pivot.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees, in `[0, 360)`.
    pub rotation: f64,
    /// Template width at creation time. Never changes.
    pub base_width: f64,
    /// Template height at creation time. Never changes.
    pub base_height: f64,
}

/// Sparse update for a furniture item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialFurnitureItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl PartialFurnitureItem {
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    #[must_use]
    pub fn rotation(rotation: f64) -> Self {
        Self { rotation: Some(rotation), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none() && self.rotation.is_none()
    }
}

impl FurnitureItem {
    /// Instantiate a template dropped at `drop` (logical space).
    ///
    /// The size is pre-multiplied by `zoom` and rounded, so the item looks
    /// the template's nominal size at the moment of the drop. A box smaller
    /// than the minimum is scaled up uniformly until its shorter side reaches
    /// it. The base size keeps the unscaled template dimensions.
    #[must_use]
    pub fn from_template(template: &FurnitureTemplate, drop: Point, zoom: f64) -> Self {
        let (width, height) = floor_uniformly((template.width * zoom).round(), (template.height * zoom).round());
        Self {
            id: Uuid::new_v4(),
            name: template.name.clone(),
            image: template.image.clone(),
            x: drop.x,
            y: drop.y,
            width,
            height,
            rotation: 0.0,
            base_width: template.width,
            base_height: template.height,
        }
    }

    /// Return a copy with `partial` applied. Sizes are floored at the
    /// minimum and rotation is wrapped into `[0, 360)`.
    #[must_use]
    pub fn with(&self, partial: &PartialFurnitureItem) -> Self {
        Self {
            x: partial.x.unwrap_or(self.x),
            y: partial.y.unwrap_or(self.y),
            width: partial.width.map_or(self.width, |w| w.max(MIN_ITEM_SIZE)),
            height: partial.height.map_or(self.height, |h| h.max(MIN_ITEM_SIZE)),
            rotation: partial.rotation.map_or(self.rotation, geometry::normalize_degrees),
            ..self.clone()
        }
    }

    /// Pull a stored item back within the model's bounds: finite position,
    /// sizes at or above the minimum, rotation in `[0, 360)`.
    fn sanitize(&mut self) {
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
        self.width = self.width.max(MIN_ITEM_SIZE);
        self.height = self.height.max(MIN_ITEM_SIZE);
        self.rotation = if self.rotation.is_finite() { geometry::normalize_degrees(self.rotation) } else { 0.0 };
    }

    /// Rotation pivot and position in logical space.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The item's box in its own rotated frame (origin at `(0, 0)`).
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    /// Logical-space center of the item, accounting for rotation.
    #[must_use]
    pub fn center(&self) -> Point {
        geometry::to_world(self.origin(), self.rotation, Point::new(self.width / 2.0, self.height / 2.0))
    }

    /// Whether a logical point lies inside the rotated box.
    #[must_use]
    pub fn contains(&self, logical: Point) -> bool {
        let p = geometry::to_local(self.origin(), self.rotation, logical);
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// View configuration a new scene inherits from the active one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub scale: f64,
    pub show_grid: bool,
    pub snap_enabled: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { scale: 1.0, show_grid: false, snap_enabled: false }
    }
}

/// One saved layout: furniture, background, and view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    /// Paint order, back to front.
    pub furniture: Vec<FurnitureItem>,
    pub background: Option<Background>,
    /// User zoom, kept within `[ZOOM_MIN, ZOOM_MAX]`.
    pub scale: f64,
    pub show_grid: bool,
    pub snap_enabled: bool,
}

impl Scene {
    /// A new empty scene with the given view settings.
    #[must_use]
    pub fn new(name: impl Into<String>, view: ViewSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            furniture: Vec::new(),
            background: None,
            scale: clamp_zoom(view.scale),
            show_grid: view.show_grid,
            snap_enabled: view.snap_enabled,
        }
    }

    #[must_use]
    pub fn view(&self) -> ViewSettings {
        ViewSettings { scale: self.scale, show_grid: self.show_grid, snap_enabled: self.snap_enabled }
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&FurnitureItem> {
        self.furniture.iter().find(|f| f.id == *id)
    }

    /// Instantiate `template` at `drop` and append it on top.
    pub fn add_furniture(&mut self, template: &FurnitureTemplate, drop: Point, zoom: f64) -> FurnitureItem {
        let item = FurnitureItem::from_template(template, drop, zoom);
        self.furniture.push(item.clone());
        item
    }

    /// Replace the matching item with an updated copy. Returns the new value,
    /// or `None` if no item has that id.
    pub fn update_furniture(&mut self, id: &ItemId, partial: &PartialFurnitureItem) -> Option<FurnitureItem> {
        let slot = self.furniture.iter_mut().find(|f| f.id == *id)?;
        let updated = slot.with(partial);
        *slot = updated.clone();
        Some(updated)
    }

    /// Remove the matching item, returning it if it was present.
    pub fn delete_furniture(&mut self, id: &ItemId) -> Option<FurnitureItem> {
        let idx = self.furniture.iter().position(|f| f.id == *id)?;
        Some(self.furniture.remove(idx))
    }

    /// Assign or clear the background. Furniture is left where it is.
    pub fn set_background(&mut self, background: Option<Background>) {
        self.background = background;
    }

    /// Set the zoom, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_zoom(scale);
    }
}

/// Scale a box up so its shorter side is at least the minimum item size.
fn floor_uniformly(width: f64, height: f64) -> (f64, f64) {
    if width >= MIN_ITEM_SIZE && height >= MIN_ITEM_SIZE {
        return (width, height);
    }
    if !(width > 0.0 && height > 0.0) {
        return (width.max(MIN_ITEM_SIZE), height.max(MIN_ITEM_SIZE));
    }
    if width <= height {
        (MIN_ITEM_SIZE, height * MIN_ITEM_SIZE / width)
    } else {
        (width * MIN_ITEM_SIZE / height, MIN_ITEM_SIZE)
    }
}

/// Clamp a zoom factor into `[ZOOM_MIN, ZOOM_MAX]`; non-finite values reset to 1.
#[must_use]
pub fn clamp_zoom(scale: f64) -> f64 {
    if scale.is_finite() { scale.clamp(ZOOM_MIN, ZOOM_MAX) } else { 1.0 }
}

// =============================================================================
// SCENE STORE
// =============================================================================

/// The ordered scene collection plus the active scene.
///
/// Never empty: constructors fall back to a single default scene and
/// deleting the last scene is rejected.
#[derive(Debug, Clone)]
pub struct SceneStore {
    scenes: Vec<Scene>,
    active: SceneId,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    /// A store holding one fresh default scene.
    #[must_use]
    pub fn new() -> Self {
        let scene = Scene::new(scene_name(1), ViewSettings::default());
        let active = scene.id;
        Self { scenes: vec![scene], active }
    }

    /// Restore a persisted collection; the first scene becomes active.
    /// An empty collection yields a default store.
    ///
    /// Stored data is not trusted: zoom is clamped, item sizes and rotations
    /// are brought back in range, and repeated scene or item ids are replaced
    /// with fresh ones.
    #[must_use]
    pub fn from_scenes(mut scenes: Vec<Scene>) -> Self {
        let mut scene_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for scene in &mut scenes {
            if !scene_ids.insert(scene.id) {
                scene.id = Uuid::new_v4();
                scene_ids.insert(scene.id);
            }
            scene.scale = clamp_zoom(scene.scale);
            for item in &mut scene.furniture {
                if !item_ids.insert(item.id) {
                    item.id = Uuid::new_v4();
                    item_ids.insert(item.id);
                }
                item.sanitize();
            }
        }
        let Some(first) = scenes.first() else {
            return Self::new();
        };
        let active = first.id;
        Self { scenes, active }
    }

    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    #[must_use]
    pub fn active_id(&self) -> SceneId {
        self.active
    }

    #[must_use]
    pub fn get(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == *id)
    }

    /// The active scene.
    #[must_use]
    pub fn active(&self) -> &Scene {
        match self.scenes.iter().position(|s| s.id == self.active) {
            Some(idx) => &self.scenes[idx],
            None => &self.scenes[0],
        }
    }

    /// Mutable access to the active scene.
    pub fn active_mut(&mut self) -> &mut Scene {
        let idx = self.scenes.iter().position(|s| s.id == self.active).unwrap_or(0);
        &mut self.scenes[idx]
    }

    /// Append a new empty scene that inherits the active scene's view
    /// settings, make it active, and return its id.
    pub fn create_scene(&mut self) -> SceneId {
        let scene = Scene::new(scene_name(self.scenes.len() + 1), self.active().view());
        let id = scene.id;
        self.scenes.push(scene);
        self.active = id;
        id
    }

    /// Make `id` the active scene.
    ///
    /// # Errors
    ///
    /// [`DocError::UnknownScene`] if no scene has that id; the active scene is unchanged.
    pub fn select_scene(&mut self, id: &SceneId) -> Result<(), DocError> {
        if self.get(id).is_none() {
            return Err(DocError::UnknownScene(*id));
        }
        self.active = *id;
        Ok(())
    }

    /// Change a scene's display name.
    ///
    /// # Errors
    ///
    /// [`DocError::UnknownScene`] if no scene has that id.
    pub fn rename_scene(&mut self, id: &SceneId, name: impl Into<String>) -> Result<(), DocError> {
        let scene = self
            .scenes
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or(DocError::UnknownScene(*id))?;
        scene.name = name.into();
        Ok(())
    }

    /// Remove a scene. If it was active, the first remaining scene becomes active.
    ///
    /// # Errors
    ///
    /// [`DocError::LastScene`] when only one scene remains,
    /// [`DocError::UnknownScene`] if no scene has that id.
    pub fn delete_scene(&mut self, id: &SceneId) -> Result<Scene, DocError> {
        if self.scenes.len() <= 1 {
            return Err(DocError::LastScene);
        }
        let idx = self
            .scenes
            .iter()
            .position(|s| s.id == *id)
            .ok_or(DocError::UnknownScene(*id))?;
        let removed = self.scenes.remove(idx);
        if self.active == removed.id {
            self.active = self.scenes[0].id;
        }
        Ok(removed)
    }

    /// Clear `background_id` from every scene that references it.
    /// Returns how many scenes were changed.
    pub fn clear_background(&mut self, background_id: &str) -> usize {
        let mut cleared = 0;
        for scene in &mut self.scenes {
            if scene.background.as_ref().is_some_and(|bg| bg.id == background_id) {
                scene.background = None;
                cleared += 1;
            }
        }
        cleared
    }

    // --- Active-scene view commands ---

    pub fn zoom_in(&mut self) {
        let scene = self.active_mut();
        scene.set_scale(scene.scale + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        let scene = self.active_mut();
        scene.set_scale(scene.scale - ZOOM_STEP);
    }

    pub fn zoom_reset(&mut self) {
        self.active_mut().set_scale(1.0);
    }

    pub fn toggle_grid(&mut self) {
        let scene = self.active_mut();
        scene.show_grid = !scene.show_grid;
    }

    pub fn toggle_snap(&mut self) {
        let scene = self.active_mut();
        scene.snap_enabled = !scene.snap_enabled;
    }
}

fn scene_name(index: usize) -> String {
    format!("Scene {index}")
}
