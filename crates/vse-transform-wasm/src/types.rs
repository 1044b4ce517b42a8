//! WASM-compatible wrapper types and conversions.
//!
//! Geometry values cross the boundary either as small wrapper classes
//! (`JsRect`), as flat `Float64Array`s for point lists, or as plain objects
//! via serde_wasm_bindgen for anything structured.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vse_transform_core::{GeometryError, Point, Rect, StripUpdate};
use wasm_bindgen::prelude::*;

/// An axis-aligned box in canvas pixels (y up).
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsRect {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
}

#[wasm_bindgen]
impl JsRect {
    #[wasm_bindgen(constructor)]
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> JsRect {
        JsRect {
            left,
            right,
            bottom,
            top,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[wasm_bindgen(getter)]
    pub fn right(&self) -> f64 {
        self.right
    }

    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// True for the collapsed box returned for fully cropped or zero-scale strips.
    pub fn is_empty(&self) -> bool {
        self.to_rect() == Rect::ZERO
    }

    /// `[left, right, bottom, top]`
    pub fn to_array(&self) -> Vec<f64> {
        vec![self.left, self.right, self.bottom, self.top]
    }
}

impl JsRect {
    pub(crate) fn to_rect(self) -> Rect {
        Rect::new(self.left, self.right, self.bottom, self.top)
    }
}

impl From<Rect> for JsRect {
    fn from(rect: Rect) -> Self {
        JsRect::new(rect.left, rect.right, rect.bottom, rect.top)
    }
}

/// A strip update keyed by the strip's index in the scene description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsStripUpdate {
    pub index: usize,
    pub update: StripUpdate,
}

/// Flatten points into `[x0, y0, x1, y1, ...]`.
pub(crate) fn flatten_points(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Pair up a flat `[x0, y0, x1, y1, ...]` list. A trailing odd value is ignored.
pub(crate) fn unflatten_points(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect()
}

/// Convert a geometry error into a JS exception value, logging it to the
/// browser console first.
pub(crate) fn geometry_error(error: GeometryError) -> JsValue {
    let message = error.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
