//! JavaScript bindings.
//!
//! The host page forwards DOM events here and reads back JSON: handlers
//! return an array of serialized [`crate::engine::Action`]s, queries return documents in the
//! same camelCase shape that is persisted. Rust errors cross the boundary as
//! `JsError`.

use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::camera::{FitMode, Point};
use crate::catalog::{BackgroundFeed, Catalog, FurnitureTemplate};
use crate::doc::{Background, Scene, SceneId};
use crate::engine::Engine;
use crate::input::{Button, Key, Modifiers};

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    Ok(serde_json::to_string(value)?)
}

fn parse_scene_id(id: &str) -> Result<SceneId, JsError> {
    Ok(Uuid::parse_str(id)?)
}

#[allow(clippy::fn_params_excessive_bools)]
fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

/// Scene list summary for the scene manager panel.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenesView<'a> {
    active_id: SceneId,
    scenes: &'a [Scene],
}

/// Module start: route `log` records to the browser console and panics to
/// `console.error`.
///
/// # Errors
///
/// If a logger was already installed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsError::new(&e.to_string()))
}

/// Normalise a furniture catalog feed. Unreadable input yields an empty catalog.
///
/// # Errors
///
/// Only if re-serialization fails.
#[wasm_bindgen(js_name = normalizeCatalog)]
pub fn normalize_catalog(text: &str) -> Result<String, JsError> {
    to_json(&Catalog::parse_or_empty(text))
}

/// Normalise a background feed. Unreadable input yields an empty list.
///
/// # Errors
///
/// Only if re-serialization fails.
#[wasm_bindgen(js_name = normalizeBackgrounds)]
pub fn normalize_backgrounds(text: &str) -> Result<String, JsError> {
    to_json(&BackgroundFeed::parse_or_empty(text))
}

/// Build the drag payload for a catalog entry.
///
/// # Errors
///
/// If serialization fails.
#[wasm_bindgen(js_name = dragPayload)]
pub fn drag_payload(name: &str, image: &str, width: f64, height: f64) -> Result<String, JsError> {
    let template = FurnitureTemplate { name: name.to_string(), image: image.to_string(), width, height };
    Ok(template.to_payload()?)
}

/// The editor handle owned by the host page.
#[wasm_bindgen]
pub struct Editor {
    engine: Engine,
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, now_ms: f64) -> Editor {
        Editor { engine: Engine::new(canvas, now_ms) }
    }

    // --- Viewport and time ---

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.engine.core.set_viewport(width_css, height_css, dpr);
    }

    /// Drive timers. Call once per animation frame.
    ///
    /// # Errors
    ///
    /// If the actions cannot be serialized.
    pub fn tick(&mut self, now_ms: f64) -> Result<String, JsError> {
        to_json(&self.engine.tick(now_ms))
    }

    /// # Errors
    ///
    /// If the actions cannot be serialized.
    pub fn activity(&mut self, now_ms: f64) -> Result<String, JsError> {
        to_json(&self.engine.on_activity(now_ms))
    }

    #[wasm_bindgen(js_name = chromeVisible)]
    #[must_use]
    pub fn chrome_visible(&self) -> bool {
        self.engine.chrome_visible()
    }

    /// Cancel any pending save. Returns whether one was pending.
    pub fn teardown(&mut self) -> bool {
        self.engine.teardown()
    }

    // --- Input ---

    /// # Errors
    ///
    /// If the actions cannot be serialized.
    #[wasm_bindgen(js_name = pointerDown)]
    #[allow(clippy::fn_params_excessive_bools, clippy::too_many_arguments)]
    pub fn pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> Result<String, JsError> {
        let actions = self.engine.core.on_pointer_down(
            Point::new(x, y),
            Button::from_dom(button),
            modifiers(shift, ctrl, alt, meta),
        );
        to_json(&actions)
    }

    /// # Errors
    ///
    /// If the actions cannot be serialized.
    #[wasm_bindgen(js_name = pointerMove)]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn pointer_move(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> Result<String, JsError> {
        to_json(&self.engine.core.on_pointer_move(Point::new(x, y), modifiers(shift, ctrl, alt, meta)))
    }

    /// # Errors
    ///
    /// If the actions cannot be serialized.
    #[wasm_bindgen(js_name = pointerUp)]
    #[allow(clippy::fn_params_excessive_bools, clippy::too_many_arguments)]
    pub fn pointer_up(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> Result<String, JsError> {
        let actions = self.engine.core.on_pointer_up(
            Point::new(x, y),
            Button::from_dom(button),
            modifiers(shift, ctrl, alt, meta),
        );
        to_json(&actions)
    }

    /// # Errors
    ///
    /// If the actions cannot be serialized.
    #[wasm_bindgen(js_name = keyDown)]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn key_down(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> Result<String, JsError> {
        to_json(&self.engine.core.on_key_down(Key(key.to_string()), modifiers(shift, ctrl, alt, meta)))
    }

    /// Handle a catalog drop at a viewport position.
    ///
    /// # Errors
    ///
    /// If the actions cannot be serialized.
    #[wasm_bindgen(js_name = dropPayload)]
    pub fn drop_payload(&mut self, payload: &str, x: f64, y: f64) -> Result<String, JsError> {
        to_json(&self.engine.core.on_drop(payload, Point::new(x, y)))
    }

    /// # Errors
    ///
    /// If the actions cannot be serialized.
    #[wasm_bindgen(js_name = deleteItem)]
    pub fn delete_item(&mut self, id: &str) -> Result<String, JsError> {
        let id = Uuid::parse_str(id)?;
        to_json(&self.engine.core.delete_item(&id))
    }

    #[must_use]
    pub fn selection(&self) -> Option<String> {
        self.engine.core.selection().map(|id| id.to_string())
    }

    // --- Render and export ---

    /// Retry images that failed to load; returns how many will be retried.
    #[wasm_bindgen(js_name = retryImages)]
    pub fn retry_images(&mut self) -> usize {
        self.engine.retry_failed_images()
    }

    /// # Errors
    ///
    /// If drawing fails.
    pub fn render(&self) -> Result<(), JsValue> {
        self.engine.render()
    }

    /// Export the active scene as a PNG download; returns the file name.
    ///
    /// # Errors
    ///
    /// If the scene has no furniture, or the browser refuses the export.
    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(&self, now_ms: f64) -> Result<String, JsError> {
        Ok(self.engine.export_png(now_ms)?)
    }

    // --- Scenes ---

    /// All scenes plus the active id.
    ///
    /// # Errors
    ///
    /// If serialization fails.
    pub fn scenes(&self) -> Result<String, JsError> {
        let store = &self.engine.core.store;
        to_json(&ScenesView { active_id: store.active_id(), scenes: store.scenes() })
    }

    #[wasm_bindgen(js_name = createScene)]
    pub fn create_scene(&mut self) -> String {
        self.engine.core.create_scene().to_string()
    }

    /// # Errors
    ///
    /// If the id is malformed or unknown.
    #[wasm_bindgen(js_name = selectScene)]
    pub fn select_scene(&mut self, id: &str) -> Result<(), JsError> {
        Ok(self.engine.core.select_scene(&parse_scene_id(id)?)?)
    }

    /// # Errors
    ///
    /// If the id is malformed or unknown.
    #[wasm_bindgen(js_name = renameScene)]
    pub fn rename_scene(&mut self, id: &str, name: &str) -> Result<(), JsError> {
        Ok(self.engine.core.rename_scene(&parse_scene_id(id)?, name)?)
    }

    /// # Errors
    ///
    /// If the id is malformed or unknown, or it names the only scene.
    #[wasm_bindgen(js_name = deleteScene)]
    pub fn delete_scene(&mut self, id: &str) -> Result<(), JsError> {
        self.engine.core.delete_scene(&parse_scene_id(id)?)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) {
        self.engine.core.zoom_in();
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) {
        self.engine.core.zoom_out();
    }

    #[wasm_bindgen(js_name = zoomReset)]
    pub fn zoom_reset(&mut self) {
        self.engine.core.zoom_reset();
    }

    #[wasm_bindgen(js_name = toggleGrid)]
    pub fn toggle_grid(&mut self) {
        self.engine.core.toggle_grid();
    }

    #[wasm_bindgen(js_name = toggleSnap)]
    pub fn toggle_snap(&mut self) {
        self.engine.core.toggle_snap();
    }

    #[wasm_bindgen(js_name = togglePan)]
    pub fn toggle_pan(&mut self) -> bool {
        self.engine.core.toggle_pan()
    }

    /// Returns the new mode, `"cover"` or `"contain"`.
    #[wasm_bindgen(js_name = toggleFitMode)]
    pub fn toggle_fit_mode(&mut self) -> String {
        match self.engine.core.toggle_fit_mode() {
            FitMode::Cover => "cover".to_string(),
            FitMode::Contain => "contain".to_string(),
        }
    }

    // --- Backgrounds ---

    /// Set the active scene's background from its JSON form; an empty
    /// string clears it.
    ///
    /// # Errors
    ///
    /// If the JSON is not a background.
    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, json: &str) -> Result<(), JsError> {
        let background = if json.trim().is_empty() { None } else { Some(serde_json::from_str::<Background>(json)?) };
        self.engine.core.set_background(background);
        Ok(())
    }

    /// # Errors
    ///
    /// If serialization fails.
    #[wasm_bindgen(js_name = customBackgrounds)]
    pub fn custom_backgrounds(&self) -> Result<String, JsError> {
        to_json(&self.engine.custom_backgrounds())
    }

    /// Store an uploaded image; returns the new background as JSON.
    ///
    /// # Errors
    ///
    /// If storage is unavailable or full.
    #[wasm_bindgen(js_name = uploadBackground)]
    pub fn upload_background(&mut self, name: &str, data_url: &str, width: f64, height: f64) -> Result<String, JsError> {
        let background = self.engine.upload_background(name, data_url, width, height)?;
        to_json(&background)
    }

    /// # Errors
    ///
    /// If storage is unavailable or the write fails.
    #[wasm_bindgen(js_name = deleteCustomBackground)]
    pub fn delete_custom_background(&mut self, id: &str) -> Result<bool, JsError> {
        Ok(self.engine.delete_custom_background(id)?)
    }

    // --- Welcome ---

    #[wasm_bindgen(js_name = hasSeenWelcome)]
    #[must_use]
    pub fn has_seen_welcome(&self) -> bool {
        self.engine.has_seen_welcome()
    }

    /// # Errors
    ///
    /// If storage is unavailable or the write fails.
    #[wasm_bindgen(js_name = markWelcomeSeen)]
    pub fn mark_welcome_seen(&mut self) -> Result<(), JsError> {
        Ok(self.engine.mark_welcome_seen()?)
    }
}

