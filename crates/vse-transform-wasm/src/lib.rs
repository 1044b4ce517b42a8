//! VSE Transform WASM - WebAssembly bindings for the strip geometry
//!
//! This crate exposes the vse-transform-core functionality to
//! JavaScript/TypeScript hosts.
//!
//! # Module Structure
//!
//! - `scene` - `JsScene`, a built strip graph with geometry queries and
//!   grab/rotate/scale/autocrop operators
//! - `session` - `JsCropSession` for interactive crop dragging
//! - `geometry` - stateless helpers (rotation, snapping, crop compensation)
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsScene } from '@vse-transform/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const scene = new JsScene(description);
//! const box = scene.strip_box(0);
//! console.log(`Strip spans ${box.width}x${box.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod geometry;
mod scene;
mod session;
mod types;

// Re-export public types
pub use geometry::{
    nearest_snap_point, post_rotation_bounding_box, rotate_point, snap_translation,
    solve_crop_rescale,
};
pub use scene::JsScene;
pub use session::JsCropSession;
pub use types::JsRect;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
