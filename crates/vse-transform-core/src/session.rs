//! Interactive crop editing.
//!
//! A [`CropSession`] remembers the crop and transform a strip had when the
//! drag started. Every drag step re-solves from that initial state, so the
//! result never accumulates rounding drift and cancelling is exact.

use crate::geometry::{crop_request, solve_crop_rescale, CropRescaleRequest};
use crate::strip::{StripGraph, StripId, StripKind};
use crate::types::{Canvas, CropSpec, GeometryError, Transform};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One of the four crop handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropEdge {
    Left,
    Right,
    Bottom,
    Top,
}

/// Crop and transform to write back for the strips a session edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropUpdate {
    pub source: StripId,
    pub crop: CropSpec,
    pub transform_id: StripId,
    pub transform: Transform,
}

impl CropUpdate {
    /// Enable cropping on the source and store both values.
    pub fn apply(&self, graph: &mut StripGraph) -> Result<(), GeometryError> {
        match &mut graph.get_mut(self.source)?.kind {
            StripKind::Source(source) => {
                source.use_crop = true;
                source.crop = self.crop;
            }
            StripKind::Transform(_) => return Err(GeometryError::NotASource(self.source.index())),
        }
        graph.set_transform(self.transform_id, self.transform)
    }
}

#[derive(Debug, Clone)]
pub struct CropSession {
    transform_id: StripId,
    source: StripId,
    canvas: Canvas,
    initial: CropRescaleRequest,
    crop: CropSpec,
    units_per_pixel_x: f64,
    units_per_pixel_y: f64,
}

impl CropSession {
    /// Start editing the crop of the source below `transform_id`.
    pub fn begin(
        graph: &StripGraph,
        transform_id: StripId,
        proxy_factor: f64,
        canvas: &Canvas,
    ) -> Result<Self, GeometryError> {
        let (node, _) = graph.transform_node(transform_id)?;
        let (source, _) = graph.leaf_of(node.input)?;
        let mut initial =
            crop_request(graph, transform_id, CropSpec::default(), proxy_factor, canvas)?;
        initial.new_crop = initial.old_crop;
        let start = solve_crop_rescale(&initial, canvas);

        debug!(
            transform = transform_id.index(),
            source = source.index(),
            "crop session started"
        );

        Ok(Self {
            transform_id,
            source,
            canvas: *canvas,
            initial,
            crop: initial.old_crop,
            units_per_pixel_x: start.units_per_pixel_x,
            units_per_pixel_y: start.units_per_pixel_y,
        })
    }

    /// Move one edge inward by `pixel_delta` screen pixels (negative moves
    /// it outward). The edge stays within `[0, size - opposite edge]`.
    pub fn drag(&mut self, edge: CropEdge, pixel_delta: f64) -> CropUpdate {
        let width = self.initial.orig_width * self.initial.proxy_factor;
        let height = self.initial.orig_height * self.initial.proxy_factor;
        let dx = pixel_delta * self.units_per_pixel_x;
        let dy = pixel_delta * self.units_per_pixel_y;
        let crop = &mut self.crop;

        match edge {
            CropEdge::Left => crop.left = nudge(crop.left, dx, width - crop.right),
            CropEdge::Right => crop.right = nudge(crop.right, dx, width - crop.left),
            CropEdge::Bottom => crop.bottom = nudge(crop.bottom, dy, height - crop.top),
            CropEdge::Top => crop.top = nudge(crop.top, dy, height - crop.bottom),
        }
        trace!(?edge, pixel_delta, crop = ?self.crop, "crop drag");
        self.current()
    }

    /// Result of the drags so far.
    pub fn current(&self) -> CropUpdate {
        let request = CropRescaleRequest {
            new_crop: self.crop,
            ..self.initial
        };
        let solved = solve_crop_rescale(&request, &self.canvas);
        self.update(self.crop, solved.transform)
    }

    /// Abort the session, returning the values to restore.
    pub fn cancel(self) -> CropUpdate {
        debug!(transform = self.transform_id.index(), "crop session cancelled");
        self.update(self.initial.old_crop, self.initial.transform)
    }

    pub fn crop(&self) -> CropSpec {
        self.crop
    }

    fn update(&self, crop: CropSpec, transform: Transform) -> CropUpdate {
        CropUpdate {
            source: self.source,
            crop,
            transform_id: self.transform_id,
            transform,
        }
    }
}

fn nudge(value: f64, delta: f64, limit: f64) -> f64 {
    (value + delta).clamp(0.0, limit.max(0.0))
}
