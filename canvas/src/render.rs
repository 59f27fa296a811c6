//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of scene, camera, and image state and produces
//! pixels. It does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level callers ([`crate::engine::Engine::render`] and the export
//! path) handle the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::camera::{Camera, Size};
use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{FurnitureItem, ItemId, Scene};
use crate::geometry;
use crate::hit::ResizeAnchor;
use crate::images::ImageCache;

/// Fill behind the stage when a scene has no background.
const CANVAS_FILL: &str = "#ffffff";

const GRID_STROKE: &str = "#e2e8f0";

const SELECTION_STROKE: &str = "#CBB8F9";
const HANDLE_FILL: &str = "#ffffff";

/// Selection outline width in screen pixels.
const SELECTION_WIDTH_PX: f64 = 2.0;

/// Draw the full scene: background, grid, furniture, and selection UI.
///
/// `viewport` is in CSS pixels and `dpr` is the device pixel ratio. Pass no
/// selection to draw without editing chrome (as export does).
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    camera: &Camera,
    selection: Option<ItemId>,
    images: &ImageCache<HtmlImageElement>,
    viewport: Size,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear and set up transforms.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    if scene.background.is_none() {
        ctx.set_fill_style_str(CANVAS_FILL);
        ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
    }
    let scale = camera.effective_scale();
    ctx.translate(camera.origin_x, camera.origin_y)?;
    ctx.scale(scale, scale)?;

    // Layer 2: background at its intrinsic size.
    if let Some(bg) = &scene.background {
        if let Some(image) = images.get(&bg.image) {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, bg.width, bg.height)?;
        }
    }

    // Layer 3: grid.
    if scene.show_grid {
        draw_grid(ctx, camera);
    }

    // Layer 4: furniture in paint order. Items whose image is not decoded yet are skipped.
    for item in &scene.furniture {
        if let Some(image) = images.get(&item.image) {
            draw_item(ctx, item, image)?;
        }
    }

    // Layer 5: selection UI.
    if let Some(item) = selection.and_then(|id| scene.item(&id)) {
        draw_selection(ctx, item, camera)?;
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, camera: &Camera) {
    ctx.save();
    ctx.set_stroke_style_str(GRID_STROKE);
    ctx.set_line_width(camera.screen_dist_to_logical(1.0));
    ctx.begin_path();
    for (a, b) in geometry::grid_lines(camera.logical, camera.grid_spacing()) {
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_item(ctx: &CanvasRenderingContext2d, item: &FurnitureItem, image: &HtmlImageElement) -> Result<(), JsValue> {
    ctx.save();
    translate_and_rotate(ctx, item)?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, item.width, item.height)?;
    ctx.restore();
    Ok(())
}

fn draw_selection(ctx: &CanvasRenderingContext2d, item: &FurnitureItem, camera: &Camera) -> Result<(), JsValue> {
    let handle = camera.screen_dist_to_logical(HANDLE_RADIUS_PX);
    let stem = camera.screen_dist_to_logical(ROTATE_HANDLE_OFFSET_PX);

    ctx.save();
    translate_and_rotate(ctx, item)?;
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(camera.screen_dist_to_logical(SELECTION_WIDTH_PX));
    ctx.stroke_rect(0.0, 0.0, item.width, item.height);

    // Rotate handle on a stem above the top edge.
    ctx.begin_path();
    ctx.move_to(item.width / 2.0, 0.0);
    ctx.line_to(item.width / 2.0, -stem);
    ctx.stroke();

    ctx.set_fill_style_str(HANDLE_FILL);
    ctx.begin_path();
    ctx.arc(item.width / 2.0, -stem, handle * 0.75, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.stroke();

    // Corner handles.
    for anchor in ResizeAnchor::ALL {
        let p = anchor.local_point(item.width, item.height);
        ctx.fill_rect(p.x - handle / 2.0, p.y - handle / 2.0, handle, handle);
        ctx.stroke_rect(p.x - handle / 2.0, p.y - handle / 2.0, handle, handle);
    }

    ctx.restore();
    Ok(())
}

/// Move the context into the item's frame: origin at `(x, y)`, turned by its rotation.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, item: &FurnitureItem) -> Result<(), JsValue> {
    ctx.translate(item.x, item.y)?;
    ctx.rotate(item.rotation.to_radians())?;
    Ok(())
}
