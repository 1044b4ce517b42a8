//! Crop session bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession(scene, 1);
//! // On every mouse move while dragging the left handle
//! const { crop, transform } = session.drag('left', dx);
//! // On release
//! session.commit(scene);
//! ```

use crate::scene::JsScene;
use crate::types::{geometry_error, to_js};
use serde::Serialize;
use vse_transform_core::{CropEdge, CropSession, CropSpec, CropUpdate, Transform};
use wasm_bindgen::prelude::*;

/// Crop and compensated transform after a drag step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JsCropState {
    pub crop: CropSpec,
    pub transform: Transform,
}

impl From<CropUpdate> for JsCropState {
    fn from(update: CropUpdate) -> Self {
        Self {
            crop: update.crop,
            transform: update.transform,
        }
    }
}

pub(crate) fn parse_edge(edge: &str) -> Option<CropEdge> {
    match edge.to_ascii_lowercase().as_str() {
        "left" => Some(CropEdge::Left),
        "right" => Some(CropEdge::Right),
        "bottom" => Some(CropEdge::Bottom),
        "top" => Some(CropEdge::Top),
        _ => None,
    }
}

#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Start a crop drag on the transform strip at `index`.
    #[wasm_bindgen(constructor)]
    pub fn new(scene: &JsScene, index: usize) -> Result<JsCropSession, JsValue> {
        let scene = scene.scene();
        let id = scene.id(index).map_err(geometry_error)?;
        let proxy_factor = scene.settings.proxy_factor;
        let inner = CropSession::begin(&scene.graph, id, proxy_factor, &scene.canvas)
            .map_err(geometry_error)?;
        Ok(JsCropSession { inner })
    }

    /// Move an edge (`"left"`, `"right"`, `"bottom"` or `"top"`) inward by
    /// `pixel_delta` screen pixels. Returns `{ crop, transform }`.
    pub fn drag(&mut self, edge: &str, pixel_delta: f64) -> Result<JsValue, JsValue> {
        let edge = parse_edge(edge)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown crop edge: {}", edge)))?;
        to_js(&JsCropState::from(self.inner.drag(edge, pixel_delta)))
    }

    /// Current `{ crop, transform }`.
    pub fn current(&self) -> Result<JsValue, JsValue> {
        to_js(&JsCropState::from(self.inner.current()))
    }

    /// Write the current crop and transform into the scene.
    pub fn commit(&self, scene: &mut JsScene) -> Result<(), JsValue> {
        self.inner
            .current()
            .apply(&mut scene.scene_mut().graph)
            .map_err(geometry_error)
    }

    /// Restore the scene to the values from before the drag. Returns the
    /// restored `{ crop, transform }`.
    pub fn cancel(self, scene: &mut JsScene) -> Result<JsValue, JsValue> {
        let update = self.inner.cancel();
        update
            .apply(&mut scene.scene_mut().graph)
            .map_err(geometry_error)?;
        to_js(&JsCropState::from(update))
    }
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Deserialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Deserialize)]
    struct CropState {
        crop: CropSpec,
        transform: Transform,
    }

    fn js_scene() -> JsScene {
        let js = js_sys::JSON::parse(
            r#"{
                "canvas": { "width": 1000, "height": 1000 },
                "strips": [
                    { "type": "source", "orig_size": [1000, 1000] },
                    { "type": "transform", "input": 0 }
                ]
            }"#,
        )
        .unwrap();
        JsScene::new(js).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_drag_left() {
        let scene = js_scene();
        let mut session = JsCropSession::new(&scene, 1).unwrap();
        let state: CropState =
            serde_wasm_bindgen::from_value(session.drag("left", 100.0).unwrap()).unwrap();
        assert_eq!(state.crop.left, 100.0);
        assert!((state.transform.translate_x - 45.0).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn test_unknown_edge() {
        let scene = js_scene();
        let mut session = JsCropSession::new(&scene, 1).unwrap();
        assert!(session.drag("middle", 1.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_session_on_source_fails() {
        let scene = js_scene();
        assert!(JsCropSession::new(&scene, 0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_commit_then_cancel() {
        let mut scene = js_scene();
        let mut session = JsCropSession::new(&scene, 1).unwrap();
        session.drag("right", 100.0).unwrap();
        session.commit(&mut scene).unwrap();
        assert!((scene.transform_box(1).unwrap().width() - 900.0).abs() < 1e-9);

        session.cancel(&mut scene).unwrap();
        assert_eq!(scene.transform_box(1).unwrap().width(), 1000.0);
    }
}
