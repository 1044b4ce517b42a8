//! Unrotated box resolvers for source and transform strips.
//!
//! # Coordinate System
//!
//! - Canvas pixels, origin at the bottom-left corner of the canvas, y up
//! - A transform strip's box is expressed in its parent's space, which for
//!   every supported chain is the canvas itself

use crate::strip::{SourceStrip, Strip, StripGraph, StripId, StripKind};
use crate::types::{Canvas, GeometryError, Point, Rect, Transform};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Why a resolver collapsed its result to [`Rect::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degeneracy {
    /// Crop insets consumed the whole source.
    Crop,
    /// A zero or negative scale flattened the box.
    Scale,
}

/// A resolved box together with the reason it collapsed, if it did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub rect: Rect,
    pub degenerate: Option<Degeneracy>,
}

impl Resolution {
    fn ok(rect: Rect) -> Self {
        Self {
            rect,
            degenerate: None,
        }
    }

    fn collapsed(cause: Degeneracy) -> Self {
        Self {
            rect: Rect::ZERO,
            degenerate: Some(cause),
        }
    }
}

/// Compute the unrotated box of a source strip.
///
/// Rules are checked in order, first match wins:
/// 1. No translation and no crop: the full canvas
/// 2. Crop without translation: the full canvas (the cropped image is
///    stretched back over the frame)
/// 3. No intrinsic size: canvas minus the crop insets, moved by the offset
/// 4. Translation only: `[ox, ox + w, oy, oy + h]`
/// 5. Translation and crop: the cropped size placed at the offset
///
/// A box with no area collapses to [`Rect::ZERO`].
pub fn strip_box(source: &SourceStrip, canvas: &Canvas) -> Rect {
    strip_box_diagnosed(source, canvas).rect
}

/// [`strip_box`] with the collapse reason.
pub fn strip_box_diagnosed(source: &SourceStrip, canvas: &Canvas) -> Resolution {
    if !source.use_translation {
        // Rules 1 and 2
        return Resolution::ok(canvas.bounds());
    }

    let (ox, oy) = (source.offset_x, source.offset_y);
    let crop = if source.use_crop {
        source.crop.clamped()
    } else {
        Default::default()
    };

    let rect = match source.orig_size {
        None => Rect::new(
            crop.left + ox,
            canvas.width - crop.right + ox,
            crop.bottom + oy,
            canvas.height - crop.top + oy,
        ),
        Some((width, height)) => Rect::new(
            ox,
            ox + (width - crop.left - crop.right),
            oy,
            oy + (height - crop.bottom - crop.top),
        ),
    };

    if rect.is_degenerate() {
        trace!(?rect, "strip box collapsed by crop");
        return Resolution::collapsed(Degeneracy::Crop);
    }
    Resolution::ok(rect)
}

/// Place a frame at a transform's position and scale it about its center.
///
/// `frame` is the pre-transform box of the input; the result is the
/// transform strip's unrotated box. Non-positive sizes collapse to
/// [`Rect::ZERO`].
pub fn apply_transform_to_frame(frame: Rect, transform: &Transform, canvas: &Canvas) -> Resolution {
    let (pos_x, pos_y) = transform.position_pixels(canvas);
    let (scale_x, scale_y) = transform.effective_scale();

    let moved = frame.translated(pos_x, pos_y);
    let rect = Rect::from_center(
        moved.center(),
        frame.width() * scale_x,
        frame.height() * scale_y,
    );

    if rect.is_degenerate() {
        trace!(scale_x, scale_y, "transform box collapsed by scale");
        return Resolution::collapsed(Degeneracy::Scale);
    }
    Resolution::ok(rect)
}

/// The pre-transform frame of a transform strip's input.
///
/// A translated source renders into a full canvas-sized buffer, so its frame
/// is the canvas. Otherwise the frame is the input's own resolved box.
pub fn input_frame(
    graph: &StripGraph,
    input: &Strip,
    canvas: &Canvas,
) -> Result<Resolution, GeometryError> {
    match &input.kind {
        StripKind::Source(source) if source.use_translation => Ok(Resolution::ok(canvas.bounds())),
        StripKind::Source(source) => Ok(strip_box_diagnosed(source, canvas)),
        StripKind::Transform(node) => {
            let frame = input_frame(graph, graph.get(node.input)?, canvas)?;
            if frame.degenerate.is_some() {
                return Ok(frame);
            }
            Ok(apply_transform_to_frame(frame.rect, &node.transform, canvas))
        }
    }
}

/// Compute the unrotated box of a transform strip in its parent's space.
///
/// Rotation is not applied; use [`crate::geometry::strip_corners`] when
/// the rotated outline is needed.
pub fn transform_box(
    graph: &StripGraph,
    id: StripId,
    canvas: &Canvas,
) -> Result<Rect, GeometryError> {
    Ok(transform_box_diagnosed(graph, id, canvas)?.rect)
}

/// [`transform_box`] with the collapse reason.
pub fn transform_box_diagnosed(
    graph: &StripGraph,
    id: StripId,
    canvas: &Canvas,
) -> Result<Resolution, GeometryError> {
    let (node, input) = graph.transform_node(id)?;
    let frame = input_frame(graph, input, canvas)?;
    if frame.degenerate.is_some() {
        return Ok(frame);
    }
    Ok(apply_transform_to_frame(frame.rect, &node.transform, canvas))
}

/// Unrotated box of any strip.
pub fn resolve_box(
    graph: &StripGraph,
    id: StripId,
    canvas: &Canvas,
) -> Result<Rect, GeometryError> {
    match &graph.get(id)?.kind {
        StripKind::Source(source) => Ok(strip_box(source, canvas)),
        StripKind::Transform(_) => transform_box(graph, id, canvas),
    }
}

/// Map a point of an input frame into the transform strip's space.
pub(crate) fn map_into_transform(
    point: Point,
    frame: Rect,
    transform: &Transform,
    canvas: &Canvas,
) -> Point {
    let (pos_x, pos_y) = transform.position_pixels(canvas);
    let (scale_x, scale_y) = transform.effective_scale();
    let center = frame.center();
    Point::new(
        (point.x - center.x) * scale_x + center.x + pos_x,
        (point.y - center.y) * scale_y + center.y + pos_y,
    )
}
