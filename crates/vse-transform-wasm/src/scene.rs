//! Scene bindings.
//!
//! `JsScene` owns a built strip graph. Queries take strip indices into the
//! scene description the host passed in. Interactive operations apply their
//! result to the scene and return the same updates for the host to write
//! back to its own strips.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const scene = new JsScene({
//!   canvas: { width: 1920, height: 1080 },
//!   strips: [
//!     { type: 'source', name: 'clip', orig_size: [1280, 720] },
//!     { type: 'transform', name: 't', input: 0, transform: { scale_x: 0.5, scale_y: 0.5 } },
//!   ],
//! });
//!
//! const box = scene.transform_box(1);
//! const corners = scene.strip_corners(1); // Float64Array [x0, y0, ..., x3, y3]
//! const updates = scene.grab([1], 25, 0);
//! ```

use crate::types::{flatten_points, from_js, geometry_error, to_js, JsRect, JsStripUpdate};
use js_sys::Float64Array;
use serde::Serialize;
use vse_transform_core::{
    corner_bounds, geometry, grab_selection, group_box, plan_autocrop, resolve_box,
    resolve_pivot, rotate_selection, scale_selection, snap_pivot, strip_corners, Canvas,
    GeometryError, PivotMode, Point, Rect, Scene, SceneDescription, StripId, StripUpdate,
};
use wasm_bindgen::prelude::*;

/// Result of an autocrop, as seen by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsAutocrop {
    pub canvas: Canvas,
    pub shift: Point,
    pub updates: Vec<JsStripUpdate>,
    /// Indices of sources pinned to the canvas.
    pub skipped: Vec<usize>,
}

#[wasm_bindgen]
pub struct JsScene {
    scene: Scene,
}

#[wasm_bindgen]
impl JsScene {
    /// Build a scene from a description object.
    #[wasm_bindgen(constructor)]
    pub fn new(description: JsValue) -> Result<JsScene, JsValue> {
        let description: SceneDescription = from_js(description, "scene description")?;
        JsScene::from_description(&description).map_err(geometry_error)
    }

    #[wasm_bindgen(getter)]
    pub fn canvas_width(&self) -> f64 {
        self.scene.canvas.width
    }

    #[wasm_bindgen(getter)]
    pub fn canvas_height(&self) -> f64 {
        self.scene.canvas.height
    }

    #[wasm_bindgen(getter)]
    pub fn strip_count(&self) -> usize {
        self.scene.ids().len()
    }

    /// Unrotated box of a strip (source box or transform box).
    pub fn strip_box(&self, index: usize) -> Result<JsRect, JsValue> {
        self.box_of(index).map(JsRect::from).map_err(geometry_error)
    }

    /// Unrotated box of a transform strip.
    pub fn transform_box(&self, index: usize) -> Result<JsRect, JsValue> {
        let id = self.scene.id(index).map_err(geometry_error)?;
        geometry::transform_box(&self.scene.graph, id, &self.scene.canvas)
            .map(JsRect::from)
            .map_err(geometry_error)
    }

    /// Rendered corners `[BL, TL, TR, BR]` as a flat array of 8 values.
    pub fn strip_corners(&self, index: usize) -> Result<Float64Array, JsValue> {
        let corners = self.corners_of(index).map_err(geometry_error)?;
        Ok(Float64Array::from(&flatten_points(&corners)[..]))
    }

    /// Axis-aligned box around a strip's rendered corners.
    pub fn corner_bounds(&self, index: usize) -> Result<JsRect, JsValue> {
        let id = self.scene.id(index).map_err(geometry_error)?;
        corner_bounds(&self.scene.graph, id, &self.scene.canvas)
            .map(JsRect::from)
            .map_err(geometry_error)
    }

    /// Bounding box of several strips.
    pub fn group_box(&self, indices: Vec<usize>) -> Result<JsRect, JsValue> {
        let ids = self.scene.ids_for(&indices).map_err(geometry_error)?;
        group_box(&self.scene.graph, &ids, &self.scene.canvas)
            .map(JsRect::from)
            .map_err(geometry_error)
    }

    /// Snap a canvas-centered position to the nearest corner, edge midpoint
    /// or center of the visible strips or the canvas. Returns `[x, y]`.
    pub fn snap_pivot(&self, visible: Vec<usize>, x: f64, y: f64) -> Result<Vec<f64>, JsValue> {
        let ids = self.scene.ids_for(&visible).map_err(geometry_error)?;
        let point = snap_pivot(&self.scene.graph, &ids, &self.scene.canvas, Point::new(x, y))
            .map_err(geometry_error)?;
        Ok(vec![point.x, point.y])
    }

    /// Pivot for the selection under the configured pivot mode, as `[x, y]`
    /// canvas-centered, or `undefined` when each strip uses its own origin.
    pub fn resolve_pivot(
        &self,
        selection: Vec<usize>,
        cursor_x: f64,
        cursor_y: f64,
        active: Option<usize>,
    ) -> Result<Option<Vec<f64>>, JsValue> {
        self.pivot(&selection, Point::new(cursor_x, cursor_y), active)
            .map(|pivot| pivot.map(|p| vec![p.x, p.y]))
            .map_err(geometry_error)
    }

    /// Move the selection by a pixel delta.
    pub fn grab(&mut self, selection: Vec<usize>, dx: f64, dy: f64) -> Result<JsValue, JsValue> {
        let ids = self.scene.ids_for(&selection).map_err(geometry_error)?;
        let updates = grab_selection(&self.scene.graph, &ids, dx, dy, &self.scene.canvas)
            .map_err(geometry_error)?;
        let updates = self.apply(updates).map_err(geometry_error)?;
        to_js(&updates)
    }

    /// Correct a grab delta so the selection's edges or center snap to the
    /// canvas or other visible strips within the configured threshold.
    /// Returns the corrected `[dx, dy]`.
    pub fn snap_grab(
        &self,
        selection: Vec<usize>,
        visible: Vec<usize>,
        dx: f64,
        dy: f64,
    ) -> Result<Vec<f64>, JsValue> {
        self.snapped_delta(&selection, &visible, (dx, dy))
            .map(|(dx, dy)| vec![dx, dy])
            .map_err(geometry_error)
    }

    /// Rotate the selection around the configured pivot.
    pub fn rotate(
        &mut self,
        selection: Vec<usize>,
        angle_degrees: f64,
        cursor_x: f64,
        cursor_y: f64,
        active: Option<usize>,
    ) -> Result<JsValue, JsValue> {
        let ids = self.scene.ids_for(&selection).map_err(geometry_error)?;
        let pivot = self
            .pivot(&selection, Point::new(cursor_x, cursor_y), active)
            .map_err(geometry_error)?;
        let updates =
            rotate_selection(&self.scene.graph, &ids, pivot, angle_degrees, &self.scene.canvas)
                .map_err(geometry_error)?;
        let updates = self.apply(updates).map_err(geometry_error)?;
        to_js(&updates)
    }

    /// Scale the selection around the configured pivot.
    pub fn scale(
        &mut self,
        selection: Vec<usize>,
        factor_x: f64,
        factor_y: f64,
        cursor_x: f64,
        cursor_y: f64,
        active: Option<usize>,
    ) -> Result<JsValue, JsValue> {
        let ids = self.scene.ids_for(&selection).map_err(geometry_error)?;
        let pivot = self
            .pivot(&selection, Point::new(cursor_x, cursor_y), active)
            .map_err(geometry_error)?;
        let updates = scale_selection(
            &self.scene.graph,
            &ids,
            pivot,
            factor_x,
            factor_y,
            &self.scene.canvas,
        )
        .map_err(geometry_error)?;
        let updates = self.apply(updates).map_err(geometry_error)?;
        to_js(&updates)
    }

    /// Fit the canvas to the visible strips and reposition them.
    pub fn autocrop(&mut self, visible: Vec<usize>) -> Result<JsValue, JsValue> {
        let result = self.autocrop_indices(&visible).map_err(geometry_error)?;
        to_js(&result)
    }

    /// Apply host-side updates (`[{ index, update }]`) to the scene.
    pub fn apply_updates(&mut self, updates: JsValue) -> Result<(), JsValue> {
        let updates: Vec<JsStripUpdate> = from_js(updates, "strip updates")?;
        for JsStripUpdate { index, update } in updates {
            let id = self.scene.id(index).map_err(geometry_error)?;
            self.scene.graph.apply_update(id, update).map_err(geometry_error)?;
        }
        Ok(())
    }
}

impl JsScene {
    pub(crate) fn from_description(description: &SceneDescription) -> Result<Self, GeometryError> {
        Ok(Self {
            scene: description.build()?,
        })
    }

    pub(crate) fn scene(&self) -> &Scene {
        &self.scene
    }

    pub(crate) fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub(crate) fn box_of(&self, index: usize) -> Result<Rect, GeometryError> {
        let id = self.scene.id(index)?;
        resolve_box(&self.scene.graph, id, &self.scene.canvas)
    }

    pub(crate) fn corners_of(&self, index: usize) -> Result<[Point; 4], GeometryError> {
        let id = self.scene.id(index)?;
        strip_corners(&self.scene.graph, id, &self.scene.canvas)
    }

    fn pivot(
        &self,
        selection: &[usize],
        cursor: Point,
        active: Option<usize>,
    ) -> Result<Option<Point>, GeometryError> {
        let ids = self.scene.ids_for(selection)?;
        let active = active.map(|index| self.scene.id(index)).transpose()?;
        let mode: PivotMode = self.scene.settings.pivot_mode;
        resolve_pivot(&self.scene.graph, &ids, mode, cursor, active, &self.scene.canvas)
    }

    pub(crate) fn snapped_delta(
        &self,
        selection: &[usize],
        visible: &[usize],
        delta: (f64, f64),
    ) -> Result<(f64, f64), GeometryError> {
        let moving = self.scene.ids_for(selection)?;
        let visible = self.scene.ids_for(visible)?;
        geometry::snap_grab(
            &self.scene.graph,
            &moving,
            &visible,
            delta,
            &self.scene.canvas,
            self.scene.settings.snap_threshold,
        )
    }

    /// Write updates to the graph and re-key them by description index.
    fn apply(
        &mut self,
        updates: Vec<(StripId, StripUpdate)>,
    ) -> Result<Vec<JsStripUpdate>, GeometryError> {
        let mut keyed = Vec::with_capacity(updates.len());
        for (id, update) in updates {
            self.scene.graph.apply_update(id, update)?;
            if let Some(index) = self.scene.index_of(id) {
                keyed.push(JsStripUpdate { index, update });
            }
        }
        Ok(keyed)
    }

    pub(crate) fn autocrop_indices(
        &mut self,
        visible: &[usize],
    ) -> Result<JsAutocrop, GeometryError> {
        let ids = self.scene.ids_for(visible)?;
        let plan = plan_autocrop(&self.scene.graph, &ids, &self.scene.canvas)?;
        let updates = self.apply(plan.updates.clone())?;
        self.scene.canvas = plan.canvas;

        let skipped = plan
            .skipped
            .iter()
            .filter_map(|&id| self.scene.index_of(id))
            .collect();
        Ok(JsAutocrop {
            canvas: plan.canvas,
            shift: plan.shift,
            updates,
            skipped,
        })
    }
}
