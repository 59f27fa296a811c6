//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest user zoom factor a scene may hold.
pub const ZOOM_MIN: f64 = 0.3;

/// Largest user zoom factor a scene may hold.
pub const ZOOM_MAX: f64 = 3.0;

/// Increment applied by the zoom in / zoom out commands.
pub const ZOOM_STEP: f64 = 0.1;

// ── Furniture geometry ──────────────────────────────────────────

/// Minimum width and height of a furniture item, in logical units.
pub const MIN_ITEM_SIZE: f64 = 20.0;

/// Aspect-ratio deviation tolerated before a resize box is corrected.
pub const ASPECT_EPSILON: f64 = 1e-4;

/// Angle added by the keyboard rotate shortcut, in degrees.
pub const ROTATE_STEP_DEG: f64 = 45.0;

/// Angles the rotate handle snaps to.
pub const ROTATION_SNAPS_DEG: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// How close (degrees) a handle rotation must be to a snap angle to snap.
pub const ROTATION_SNAP_TOLERANCE_DEG: f64 = 5.0;

// ── Grid ────────────────────────────────────────────────────────

/// Grid spacing in screen pixels; divided by the effective scale for logical spacing.
pub const BASE_GRID_SPACING_PX: f64 = 50.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Timing ──────────────────────────────────────────────────────

/// Quiet interval before a scene snapshot is written to storage.
pub const SAVE_DEBOUNCE_MS: f64 = 400.0;

/// Inactivity interval after which auto-hiding chrome disappears.
pub const AUTO_HIDE_MS: f64 = 3000.0;

// ── Export ──────────────────────────────────────────────────────

/// Device pixel ratio used for raster export.
pub const EXPORT_PIXEL_RATIO: f64 = 2.0;

/// Filename prefix for exported images.
pub const EXPORT_FILE_PREFIX: &str = "roomboard";

// ── Storage keys ────────────────────────────────────────────────

/// Durable-storage key for the scene collection.
pub const SCENES_KEY: &str = "roomboard_scenes_v1";

/// Durable-storage key for user-uploaded backgrounds.
pub const CUSTOM_BACKGROUNDS_KEY: &str = "roomboard_uploaded_backgrounds";

/// Durable-storage key for the first-visit welcome flag.
pub const WELCOME_SEEN_KEY: &str = "roomboard_has_seen_welcome";
