use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement};

use crate::camera::{Camera, FitMode, Point, Size};
use crate::catalog::FurnitureTemplate;
use crate::consts::{AUTO_HIDE_MS, ROTATE_STEP_DEG, ROTATION_SNAP_TOLERANCE_DEG, ROTATION_SNAPS_DEG, SAVE_DEBOUNCE_MS};
use crate::debounce::Debounce;
use crate::doc::{Background, DocError, FurnitureItem, ItemId, PartialFurnitureItem, Scene, SceneId, SceneStore};
use crate::export::{self, ExportError};
use crate::geometry;
use crate::hit::{self, Hit, HitPart};
use crate::images::ImageCache;
use crate::input::{Button, InputState, Key, Modifiers, Selection, UiState};
use crate::persistence::PersistenceService;
use crate::render;
use crate::storage::{LocalStorage, StorageError};
use crate::visibility::{AutoHide, Visibility};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ItemCreated { item: FurnitureItem },
    ItemUpdated { item: FurnitureItem },
    ItemDeleted { id: ItemId },
    SelectionChanged { id: Option<ItemId> },
    SetCursor { cursor: String },
    ChromeVisibilityChanged { visible: bool },
    RenderNeeded,
}

/// Engine state that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub store: SceneStore,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Editor-wide; not persisted with scenes.
    pub fit_mode: FitMode,
    /// User pan offset in viewport pixels.
    pub pan: Point,
    cursor: String,
    dirty: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_store(SceneStore::new())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_store(store: SceneStore) -> Self {
        Self {
            store,
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            fit_mode: FitMode::default(),
            pan: Point::default(),
            cursor: "default".to_string(),
            dirty: false,
        }
    }

    // --- Data inputs ---

    /// Replace the whole scene collection, e.g. after loading from storage.
    pub fn load_scenes(&mut self, store: SceneStore) {
        self.store = store;
        self.reset_interaction();
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    // --- Queries ---

    /// The currently selected item, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.ui.selection.id()
    }

    #[must_use]
    pub fn active_scene(&self) -> &Scene {
        self.store.active()
    }

    /// Look up an item in the active scene.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&FurnitureItem> {
        self.store.active().item(id)
    }

    /// Stage layout for the current viewport and active scene, or `None`
    /// while the viewport has no size.
    #[must_use]
    pub fn camera(&self) -> Option<Camera> {
        let scene = self.store.active();
        let background = scene.background.as_ref().map(Background::size);
        Camera::layout(
            Size::new(self.viewport_width, self.viewport_height),
            background,
            self.fit_mode,
            scene.scale,
            self.pan,
        )
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Report and clear whether the scene collection changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let Some(camera) = self.camera() else {
            return Vec::new();
        };
        let world = camera.viewport_to_logical(screen_pt);
        let hit = hit::hit_test(world, self.store.active(), &camera, self.selection());

        match button {
            Button::Middle => Vec::new(),
            Button::Secondary => hit.map_or_else(Vec::new, |h| self.delete_item(&h.item_id)),
            Button::Primary => self.begin_gesture(screen_pt, world, hit),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let Some(camera) = self.camera() else {
            return Vec::new();
        };
        let world = camera.viewport_to_logical(screen_pt);

        match self.input.clone() {
            InputState::Idle => self.hover(world, &camera).into_iter().collect(),
            InputState::Panning { last_viewport } => {
                self.pan = Point::new(
                    self.pan.x + screen_pt.x - last_viewport.x,
                    self.pan.y + screen_pt.y - last_viewport.y,
                );
                self.input = InputState::Panning { last_viewport: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::DraggingItem { id, start, orig_x, orig_y } => {
                let partial = PartialFurnitureItem::position(orig_x + world.x - start.x, orig_y + world.y - start.y);
                self.preview(&id, &partial)
            }
            InputState::ResizingItem { id, anchor, start, orig_origin, orig_bounds, rotation } => {
                let local_delta = geometry::rotate_vec(Point::new(world.x - start.x, world.y - start.y), -rotation);
                let (origin, bounds) = geometry::drag_corner(
                    orig_origin,
                    rotation,
                    orig_bounds,
                    anchor.moves_left(),
                    anchor.moves_top(),
                    local_delta,
                );
                let partial = PartialFurnitureItem {
                    x: Some(origin.x),
                    y: Some(origin.y),
                    width: Some(bounds.width),
                    height: Some(bounds.height),
                    rotation: None,
                };
                self.preview(&id, &partial)
            }
            InputState::RotatingItem { id, center, start_bearing, orig_rotation, width, height } => {
                let turned = geometry::angle_delta(geometry::bearing_deg(center, world), start_bearing);
                let rotation =
                    geometry::snap_rotation(orig_rotation + turned, &ROTATION_SNAPS_DEG, ROTATION_SNAP_TOLERANCE_DEG);
                let origin = origin_for_center(center, rotation, width, height);
                let partial = PartialFurnitureItem {
                    x: Some(origin.x),
                    y: Some(origin.y),
                    rotation: Some(rotation),
                    ..PartialFurnitureItem::default()
                };
                self.preview(&id, &partial)
            }
        }
    }

    /// Finish the current gesture. The gesture ends even while the viewport
    /// has no size; only the drag-end grid snap and hover cursor need a camera.
    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let gesture = std::mem::take(&mut self.input);
        let camera = self.camera();
        let mut actions = self.finish_gesture(gesture, camera.as_ref());

        if let Some(camera) = camera {
            let world = camera.viewport_to_logical(screen_pt);
            actions.extend(self.hover(world, &camera));
        }
        actions
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.ctrl || modifiers.meta || modifiers.alt {
            return Vec::new();
        }
        let Some(id) = self.selection() else {
            return Vec::new();
        };
        if key.is_delete() {
            return self.delete_item(&id);
        }
        if key.is_rotate() {
            return self.rotate_item(&id);
        }
        Vec::new()
    }

    /// Handle a catalog item dropped at a viewport position. The payload is
    /// the serialized template; an unreadable payload is logged and ignored.
    pub fn on_drop(&mut self, payload: &str, screen_pt: Point) -> Vec<Action> {
        match FurnitureTemplate::from_payload(payload) {
            Ok(template) => self.drop_template(&template, screen_pt),
            Err(err) => {
                log::warn!("ignoring dropped payload: {err}");
                Vec::new()
            }
        }
    }

    /// Instantiate `template` under a viewport position in the active scene.
    pub fn drop_template(&mut self, template: &FurnitureTemplate, screen_pt: Point) -> Vec<Action> {
        let Some(camera) = self.camera() else {
            return Vec::new();
        };
        let world = camera.viewport_to_logical(screen_pt);
        let scene = self.store.active_mut();
        let zoom = scene.scale;
        let item = scene.add_furniture(template, world, zoom);
        self.dirty = true;
        vec![Action::ItemCreated { item }, Action::RenderNeeded]
    }

    // --- Item commands ---

    /// Remove an item from the active scene, clearing the selection with it.
    pub fn delete_item(&mut self, id: &ItemId) -> Vec<Action> {
        let Some(item) = self.store.active_mut().delete_furniture(id) else {
            return Vec::new();
        };
        let mut actions = vec![Action::ItemDeleted { id: item.id }];
        if self.selection() == Some(item.id) {
            actions.extend(self.set_selection(Selection::None));
        }
        if self.input.item_id() == Some(item.id) {
            self.input = InputState::Idle;
        }
        self.dirty = true;
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Turn an item one rotation step clockwise about its origin.
    pub fn rotate_item(&mut self, id: &ItemId) -> Vec<Action> {
        let Some(item) = self.item(id) else {
            return Vec::new();
        };
        let partial = PartialFurnitureItem::rotation(geometry::rotate_snap(item.rotation, ROTATE_STEP_DEG));
        self.store.active_mut().update_furniture(id, &partial);
        self.commit(id)
    }

    // --- Scene commands ---

    /// Add a scene inheriting the active view settings and switch to it.
    pub fn create_scene(&mut self) -> SceneId {
        let id = self.store.create_scene();
        self.reset_interaction();
        self.dirty = true;
        id
    }

    /// Switch the active scene.
    ///
    /// # Errors
    ///
    /// [`DocError::UnknownScene`] if no scene has that id.
    pub fn select_scene(&mut self, id: &SceneId) -> Result<(), DocError> {
        self.store.select_scene(id)?;
        self.reset_interaction();
        Ok(())
    }

    /// # Errors
    ///
    /// [`DocError::UnknownScene`] if no scene has that id.
    pub fn rename_scene(&mut self, id: &SceneId, name: &str) -> Result<(), DocError> {
        self.store.rename_scene(id, name)?;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// [`DocError::LastScene`] or [`DocError::UnknownScene`]; nothing changes.
    pub fn delete_scene(&mut self, id: &SceneId) -> Result<Scene, DocError> {
        let was_active = self.store.active_id() == *id;
        let removed = self.store.delete_scene(id)?;
        if was_active {
            self.reset_interaction();
        }
        self.dirty = true;
        Ok(removed)
    }

    /// Assign or clear the active scene's background.
    pub fn set_background(&mut self, background: Option<Background>) {
        self.store.active_mut().set_background(background);
        self.dirty = true;
    }

    /// Clear a deleted background from every scene that uses it.
    pub fn forget_background(&mut self, background_id: &str) -> usize {
        let cleared = self.store.clear_background(background_id);
        if cleared > 0 {
            self.dirty = true;
        }
        cleared
    }

    pub fn zoom_in(&mut self) {
        self.store.zoom_in();
        self.dirty = true;
    }

    pub fn zoom_out(&mut self) {
        self.store.zoom_out();
        self.dirty = true;
    }

    pub fn zoom_reset(&mut self) {
        self.store.zoom_reset();
        self.dirty = true;
    }

    pub fn toggle_grid(&mut self) {
        self.store.toggle_grid();
        self.dirty = true;
    }

    pub fn toggle_snap(&mut self) {
        self.store.toggle_snap();
        self.dirty = true;
    }

    /// Flip pan mode; returns the new state.
    pub fn toggle_pan(&mut self) -> bool {
        self.ui.pan_mode = !self.ui.pan_mode;
        if !self.ui.pan_mode && matches!(self.input, InputState::Panning { .. }) {
            self.input = InputState::Idle;
        }
        self.ui.pan_mode
    }

    /// Switch between cover and contain; returns the new mode.
    pub fn toggle_fit_mode(&mut self) -> FitMode {
        self.fit_mode = self.fit_mode.toggled();
        self.fit_mode
    }

    // --- Internals ---

    fn begin_gesture(&mut self, screen_pt: Point, world: Point, hit: Option<Hit>) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(hit) = hit else {
            actions.extend(self.set_selection(Selection::None));
            if self.ui.pan_mode {
                self.input = InputState::Panning { last_viewport: screen_pt };
                actions.extend(self.set_cursor("grabbing"));
            }
            actions.push(Action::RenderNeeded);
            return actions;
        };
        let Some(item) = self.item(&hit.item_id).cloned() else {
            return actions;
        };

        actions.extend(self.set_selection(Selection::Item(item.id)));
        self.input = match hit.part {
            HitPart::Body => InputState::DraggingItem { id: item.id, start: world, orig_x: item.x, orig_y: item.y },
            HitPart::ResizeHandle(anchor) => InputState::ResizingItem {
                id: item.id,
                anchor,
                start: world,
                orig_origin: item.origin(),
                orig_bounds: item.local_bounds(),
                rotation: item.rotation,
            },
            HitPart::RotateHandle => {
                let center = item.center();
                InputState::RotatingItem {
                    id: item.id,
                    center,
                    start_bearing: geometry::bearing_deg(center, world),
                    orig_rotation: item.rotation,
                    width: item.width,
                    height: item.height,
                }
            }
        };
        actions.extend(self.set_cursor(cursor_for(hit.part)));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn preview(&mut self, id: &ItemId, partial: &PartialFurnitureItem) -> Vec<Action> {
        match self.store.active_mut().update_furniture(id, partial) {
            Some(_) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Commit a finished gesture if it changed its item.
    fn finish_gesture(&mut self, gesture: InputState, camera: Option<&Camera>) -> Vec<Action> {
        match gesture {
            InputState::Idle | InputState::Panning { .. } => Vec::new(),
            InputState::DraggingItem { id, orig_x, orig_y, .. } => {
                let Some(item) = self.item(&id).cloned() else {
                    return Vec::new();
                };
                if !differs(item.x, orig_x) && !differs(item.y, orig_y) {
                    return Vec::new();
                }
                let spacing = camera.filter(|_| self.store.active().snap_enabled).map(Camera::grid_spacing);
                if let Some(spacing) = spacing {
                    let snapped = PartialFurnitureItem::position(
                        geometry::snap_to_grid(item.x, spacing),
                        geometry::snap_to_grid(item.y, spacing),
                    );
                    self.store.active_mut().update_furniture(&id, &snapped);
                }
                self.commit(&id)
            }
            InputState::ResizingItem { id, orig_origin, orig_bounds, .. } => {
                let changed = self.item(&id).is_some_and(|item| {
                    differs(item.width, orig_bounds.width)
                        || differs(item.height, orig_bounds.height)
                        || differs(item.x, orig_origin.x)
                        || differs(item.y, orig_origin.y)
                });
                if changed { self.commit(&id) } else { Vec::new() }
            }
            InputState::RotatingItem { id, orig_rotation, .. } => {
                if self.item(&id).is_some_and(|item| differs(item.rotation, orig_rotation)) {
                    self.commit(&id)
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Report the item's current value as one committed update.
    fn commit(&mut self, id: &ItemId) -> Vec<Action> {
        let Some(item) = self.item(id).cloned() else {
            return Vec::new();
        };
        self.dirty = true;
        vec![Action::ItemUpdated { item }, Action::RenderNeeded]
    }

    fn hover(&mut self, world: Point, camera: &Camera) -> Option<Action> {
        let cursor = match hit::hit_test(world, self.store.active(), camera, self.selection()) {
            Some(hit) => cursor_for(hit.part),
            None if self.ui.pan_mode => "grab",
            None => "default",
        };
        self.set_cursor(cursor)
    }

    fn set_selection(&mut self, selection: Selection) -> Option<Action> {
        if self.ui.selection == selection {
            return None;
        }
        self.ui.selection = selection;
        Some(Action::SelectionChanged { id: selection.id() })
    }

    fn set_cursor(&mut self, cursor: &str) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor.to_string();
        Some(Action::SetCursor { cursor: self.cursor.clone() })
    }

    fn reset_interaction(&mut self) {
        self.ui.selection = Selection::None;
        self.input = InputState::Idle;
    }
}

fn cursor_for(part: HitPart) -> &'static str {
    match part {
        HitPart::Body => "move",
        HitPart::ResizeHandle(anchor) => anchor.cursor(),
        HitPart::RotateHandle => "crosshair",
    }
}

/// Top-left origin that puts an item's center at `center` for a rotation.
fn origin_for_center(center: Point, rotation: f64, width: f64, height: f64) -> Point {
    let half = geometry::rotate_vec(Point::new(width / 2.0, height / 2.0), rotation);
    Point::new(center.x - half.x, center.y - half.y)
}

fn differs(a: f64, b: f64) -> bool {
    (a - b).abs() > f64::EPSILON
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas
/// element, decoded images, and the storage the scenes are saved to.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
    images: Rc<RefCell<ImageCache<HtmlImageElement>>>,
    persistence: Option<PersistenceService<LocalStorage>>,
    save: Debounce,
    chrome: AutoHide,
}

impl Engine {
    /// Create an engine bound to `canvas`, restoring saved scenes when
    /// `localStorage` is available.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, now_ms: f64) -> Self {
        let persistence = match LocalStorage::open() {
            Ok(storage) => Some(PersistenceService::new(storage)),
            Err(err) => {
                log::warn!("scenes will not be saved: {err}");
                None
            }
        };
        let store = persistence.as_ref().map_or_else(SceneStore::new, PersistenceService::load_scenes);
        Self {
            canvas,
            core: EngineCore::with_store(store),
            images: Rc::new(RefCell::new(ImageCache::new())),
            persistence,
            save: Debounce::new(SAVE_DEBOUNCE_MS),
            chrome: AutoHide::new(now_ms, AUTO_HIDE_MS),
        }
    }

    // --- Time ---

    /// Advance timers: schedule and run the debounced save, hide idle
    /// chrome, and request a repaint when images finished decoding.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.core.take_dirty() {
            self.save.schedule(now_ms);
        }
        if self.save.poll(now_ms) {
            self.flush();
        }
        if self.chrome.tick(now_ms) {
            actions.push(Action::ChromeVisibilityChanged { visible: false });
        }
        if self.images.borrow_mut().take_changed() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Record user activity; reveals hidden chrome.
    pub fn on_activity(&mut self, now_ms: f64) -> Vec<Action> {
        if self.chrome.on_activity(now_ms) {
            vec![Action::ChromeVisibilityChanged { visible: true }]
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn chrome_visible(&self) -> bool {
        self.chrome.state() == Visibility::Visible
    }

    /// Drop any pending save without writing it.
    pub fn teardown(&mut self) -> bool {
        self.save.cancel()
    }

    fn flush(&mut self) {
        let Some(persistence) = self.persistence.as_mut() else {
            return;
        };
        if let Err(err) = persistence.save_scenes(self.core.store.scenes()) {
            log::error!("failed to save scenes: {err}");
        }
    }

    // --- Custom backgrounds and welcome flag ---

    #[must_use]
    pub fn custom_backgrounds(&self) -> Vec<Background> {
        self.persistence
            .as_ref()
            .map_or_else(Vec::new, PersistenceService::load_custom_backgrounds)
    }

    /// Store an uploaded image as a new custom background.
    ///
    /// # Errors
    ///
    /// [`StorageError`] if storage is unavailable or the write fails.
    pub fn upload_background(
        &mut self,
        name: &str,
        data_url: &str,
        width: f64,
        height: f64,
    ) -> Result<Background, StorageError> {
        let persistence = self.persistence.as_mut().ok_or(StorageError::Unavailable)?;
        let background = Background::uploaded(name, data_url, width, height);
        persistence.add_custom_background(background.clone())?;
        Ok(background)
    }

    /// Delete a custom background and clear it from every scene using it.
    ///
    /// # Errors
    ///
    /// [`StorageError`] if storage is unavailable or the write fails.
    pub fn delete_custom_background(&mut self, id: &str) -> Result<bool, StorageError> {
        let persistence = self.persistence.as_mut().ok_or(StorageError::Unavailable)?;
        let removed = persistence.remove_custom_background(id)?;
        if let Some(background) = &removed {
            self.images.borrow_mut().forget(&background.image);
        }
        self.core.forget_background(id);
        Ok(removed.is_some())
    }

    #[must_use]
    pub fn has_seen_welcome(&self) -> bool {
        self.persistence.as_ref().is_some_and(PersistenceService::has_seen_welcome)
    }

    /// # Errors
    ///
    /// [`StorageError`] if storage is unavailable or the write fails.
    pub fn mark_welcome_seen(&mut self) -> Result<(), StorageError> {
        self.persistence
            .as_mut()
            .ok_or(StorageError::Unavailable)?
            .mark_welcome_seen()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(camera) = self.core.camera() else {
            return Ok(());
        };
        let scene = self.core.active_scene();
        self.load_scene_images(scene);
        let ctx = context_2d(&self.canvas)?;
        let images = self.images.borrow();
        render::draw(
            &ctx,
            scene,
            &camera,
            self.core.selection(),
            &images,
            Size::new(self.core.viewport_width, self.core.viewport_height),
            self.core.dpr,
        )
    }

    /// Rasterize the active scene's logical canvas at the export pixel ratio
    /// and trigger a PNG download. Returns the downloaded file name.
    ///
    /// # Errors
    ///
    /// [`ExportError::EmptyScene`] when there is no furniture; otherwise the
    /// browser failure that stopped the export.
    pub fn export_png(&self, now_ms: f64) -> Result<String, ExportError> {
        let camera = self.core.camera().ok_or(ExportError::NoCanvas)?;
        let scene = self.core.active_scene();
        let plan = export::plan_export(scene, camera.logical, now_ms)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ExportError::NoCanvas)?;
        let canvas = document
            .create_element("canvas")
            .map_err(raster_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ExportError::NoCanvas)?;
        let (width_px, height_px) = plan.pixel_size();
        canvas.set_width(width_px);
        canvas.set_height(height_px);

        let ctx = context_2d(&canvas).map_err(raster_error)?;
        let flat = Camera { logical: plan.logical, ..Camera::default() };
        let images = self.images.borrow();
        render::draw(&ctx, scene, &flat, None, &images, plan.logical, plan.pixel_ratio).map_err(raster_error)?;
        let url = canvas.to_data_url_with_type("image/png").map_err(raster_error)?;

        let anchor = document
            .create_element("a")
            .map_err(raster_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| ExportError::Raster("anchor element unavailable".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(&plan.filename);
        anchor.click();
        log::info!("exported {} ({width_px}x{height_px})", plan.filename);
        Ok(plan.filename)
    }

    /// Forget failed image loads so the next render requests them again.
    pub fn retry_failed_images(&mut self) -> usize {
        self.images.borrow_mut().retry_failed()
    }

    fn load_scene_images(&self, scene: &Scene) {
        if let Some(background) = &scene.background {
            self.load_image(&background.image);
        }
        for item in &scene.furniture {
            self.load_image(&item.image);
        }
    }

    fn load_image(&self, src: &str) {
        if !self.images.borrow_mut().request(src) {
            return;
        }
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(err) => {
                log::warn!("cannot create image element for {src}: {err:?}");
                self.images.borrow_mut().mark_failed(src);
                return;
            }
        };

        let cache = Rc::clone(&self.images);
        let key = src.to_string();
        let decoded = image.clone();
        let onload = Closure::once_into_js(move || cache.borrow_mut().mark_ready(&key, decoded));

        let cache = Rc::clone(&self.images);
        let key = src.to_string();
        let onerror = Closure::once_into_js(move || cache.borrow_mut().mark_failed(&key));

        image.set_onload(Some(onload.unchecked_ref::<js_sys::Function>()));
        image.set_onerror(Some(onerror.unchecked_ref::<js_sys::Function>()));
        image.set_src(src);
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

fn raster_error(err: JsValue) -> ExportError {
    ExportError::Raster(format!("{err:?}"))
}
