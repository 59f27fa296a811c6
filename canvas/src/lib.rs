//! Canvas engine for the room layout editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing lifecycle of a room board: mapping pointer input from the viewport
//! into the background's logical space, placing and transforming furniture,
//! keeping the scene collection, saving it to `localStorage` behind a short
//! debounce, and rasterizing the canvas for download. The host page wires DOM
//! events to [`wasm::Editor`] and renders the panels around the canvas from
//! the JSON it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Scenes, furniture items, backgrounds, and the scene store |
//! | [`camera`] | Fit scaling, stage layout, and viewport/logical conversions |
//! | [`geometry`] | Grid snapping, aspect-locked resize, and rotation math |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing items and their transform handles |
//! | [`catalog`] | Furniture and background feeds, drag payloads |
//! | [`images`] | Decoded-image cache |
//! | [`storage`] | Key-value storage backends |
//! | [`persistence`] | Scene, custom background, and welcome-flag persistence |
//! | [`debounce`] | Clock-driven save debounce |
//! | [`visibility`] | Auto-hide state for the editor chrome |
//! | [`export`] | Raster export planning |
//! | [`render`] | Scene rendering |
//! | [`wasm`] | JavaScript bindings |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod camera;
pub mod catalog;
pub mod consts;
pub mod debounce;
pub mod doc;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod hit;
pub mod images;
pub mod input;
pub mod persistence;
pub mod render;
pub mod storage;
pub mod visibility;
pub mod wasm;
