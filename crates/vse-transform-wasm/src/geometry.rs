//! Stateless geometry bindings.
//!
//! These work on plain numbers and objects, without a `JsScene`, for hosts
//! that keep their own strip model and only need the math.

use crate::types::{flatten_points, from_js, to_js, unflatten_points, JsRect};
use vse_transform_core::geometry::{
    nearest_snap_point as core_nearest, post_rotation_bounding_box as core_rotated_bounds,
    rotate_point as core_rotate_point, snap_translation as core_snap_translation,
    solve_crop_rescale as core_solve,
};
use vse_transform_core::{Canvas, CropRescaleRequest, Point, Rect};
use wasm_bindgen::prelude::*;

/// Rotate a point counter-clockwise around an origin. Returns `[x, y]`.
#[wasm_bindgen]
pub fn rotate_point(x: f64, y: f64, angle_degrees: f64, origin_x: f64, origin_y: f64) -> Vec<f64> {
    let p = core_rotate_point(
        Point::new(x, y),
        angle_degrees.to_radians(),
        Point::new(origin_x, origin_y),
    );
    vec![p.x, p.y]
}

/// Axis-aligned box enclosing `rect` after rotating it about its center.
#[wasm_bindgen]
pub fn post_rotation_bounding_box(rect: &JsRect, angle_degrees: f64) -> JsRect {
    core_rotated_bounds(rect.to_rect(), angle_degrees.to_radians()).into()
}

/// Nearest of the candidate points (`[x0, y0, x1, y1, ...]`) to the query.
/// Returns `[x, y]`, or `undefined` when there are no candidates.
#[wasm_bindgen]
pub fn nearest_snap_point(candidates: &[f64], x: f64, y: f64) -> Option<Vec<f64>> {
    let candidates = unflatten_points(candidates);
    core_nearest(&candidates, Point::new(x, y)).map(|p| flatten_points(&[p]))
}

/// Correction `[dx, dy]` that snaps a moving box to the nearest target
/// edge or center within `threshold` pixels. Targets are flat
/// `[left, right, bottom, top, ...]` quadruples.
#[wasm_bindgen]
pub fn snap_translation(moving: &JsRect, targets: &[f64], threshold: f64) -> Vec<f64> {
    let targets: Vec<Rect> = targets
        .chunks_exact(4)
        .map(|c| Rect::new(c[0], c[1], c[2], c[3]))
        .collect();
    let (dx, dy) = core_snap_translation(moving.to_rect(), &targets, threshold);
    vec![dx, dy]
}

/// Solve crop compensation for a request object
/// (`{ old_crop, new_crop, transform, orig_width, orig_height, proxy_factor?, frame? }`).
/// `frame` is the `[width, height]` an untranslated source is stretched
/// over; leave it out for sources shown at their own size.
///
/// Returns `{ transform, factor_x, factor_y, units_per_pixel_x, units_per_pixel_y }`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const result = solve_crop_rescale({
///   old_crop: {}, new_crop: { left: 100 },
///   transform: {}, orig_width: 1000, orig_height: 1000,
/// }, 1000, 1000);
/// // result.transform.scale_x === 0.9, result.transform.translate_x === 45
/// ```
#[wasm_bindgen]
pub fn solve_crop_rescale(
    request: JsValue,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<JsValue, JsValue> {
    let request: CropRescaleRequest = from_js(request, "crop request")?;
    let canvas = Canvas::new(canvas_width, canvas_height);
    canvas
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&core_solve(&request, &canvas))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use vse_transform_core::CropRescale;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_solve_crop_rescale_defaults() {
        let request = js_sys::JSON::parse(
            r#"{ "old_crop": {}, "new_crop": { "left": 100 }, "transform": {},
                 "orig_width": 1000, "orig_height": 1000 }"#,
        )
        .unwrap();
        let result: CropRescale =
            serde_wasm_bindgen::from_value(solve_crop_rescale(request, 1000.0, 1000.0).unwrap())
                .unwrap();
        assert!((result.transform.scale_x - 0.9).abs() < 1e-12);
        assert!((result.transform.translate_x - 45.0).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn test_solve_crop_rescale_rejects_bad_canvas() {
        let request = js_sys::JSON::parse(
            r#"{ "old_crop": {}, "new_crop": {}, "transform": {},
                 "orig_width": 10, "orig_height": 10 }"#,
        )
        .unwrap();
        assert!(solve_crop_rescale(request, 0.0, 10.0).is_err());
    }
}
