//! Pivot-relative grab, rotate and scale.
//!
//! The functions here turn one frame's worth of input (a drag delta, an
//! angle, a scale factor) into new strip parameters. The host owns the
//! event loop and writes the returned [`StripUpdate`]s back.

use crate::geometry::{rotate_point, strip_corners, transform_box, BOTTOM_LEFT, TOP_RIGHT};
use crate::strip::{StripGraph, StripId, StripKind, StripUpdate};
use crate::types::{Canvas, GeometryError, Point, Transform};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Point that rotation and scaling happen around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotMode {
    /// Mean of the selected strips' centers.
    #[default]
    MedianPoint,
    /// Each strip around its own center.
    IndividualOrigins,
    /// The user-placed pivot cursor.
    Cursor,
    /// Center of the active strip.
    ActiveStrip,
}

/// Visual center of a strip (center of its rendered quad), in canvas pixels.
pub fn strip_center(
    graph: &StripGraph,
    id: StripId,
    canvas: &Canvas,
) -> Result<Point, GeometryError> {
    let corners = strip_corners(graph, id, canvas)?;
    Ok(corners[BOTTOM_LEFT].midpoint(corners[TOP_RIGHT]))
}

/// Resolve the pivot for a selection, in canvas-centered coordinates.
///
/// Returns `None` for [`PivotMode::IndividualOrigins`]. `ActiveStrip`
/// without an active strip falls back to the median point.
pub fn resolve_pivot(
    graph: &StripGraph,
    selection: &[StripId],
    mode: PivotMode,
    cursor: Point,
    active: Option<StripId>,
    canvas: &Canvas,
) -> Result<Option<Point>, GeometryError> {
    match mode {
        PivotMode::IndividualOrigins => Ok(None),
        PivotMode::Cursor => Ok(Some(cursor)),
        PivotMode::ActiveStrip => match active {
            Some(id) => Ok(Some(canvas.to_centered(strip_center(graph, id, canvas)?))),
            None => {
                debug!("no active strip, pivoting on median point");
                resolve_pivot(graph, selection, PivotMode::MedianPoint, cursor, None, canvas)
            }
        },
        PivotMode::MedianPoint => {
            if selection.is_empty() {
                return Err(GeometryError::EmptySelection);
            }
            let mut sum = Point::default();
            for &id in selection {
                let center = strip_center(graph, id, canvas)?;
                sum.x += center.x;
                sum.y += center.y;
            }
            let n = selection.len() as f64;
            Ok(Some(canvas.to_centered(Point::new(sum.x / n, sum.y / n))))
        }
    }
}

/// Move a transform by a pixel delta, keeping its translation unit.
pub fn translate_by(transform: &Transform, dx: f64, dy: f64, canvas: &Canvas) -> Transform {
    let mut result = *transform;
    let (x, y) = transform.position_pixels(canvas);
    result.set_position_pixels(x + dx, y + dy, canvas);
    result
}

/// Rotate a transform strip around an absolute pivot.
///
/// `origin` is the strip's rotation origin (the center of its transform
/// box). The origin is carried around the pivot and the strip's own
/// rotation grows by the same angle.
pub fn rotate_about_pivot(
    transform: &Transform,
    origin: Point,
    pivot: Point,
    angle_degrees: f64,
    canvas: &Canvas,
) -> Transform {
    let moved = rotate_point(origin, angle_degrees.to_radians(), pivot);
    let mut result = translate_by(transform, moved.x - origin.x, moved.y - origin.y, canvas);
    result.rotation_degrees = transform.rotation_degrees + angle_degrees;
    result
}

/// Scale a transform strip around an absolute pivot.
///
/// Scale factors apply to the strip's own axes; the distance from the pivot
/// to the strip's origin scales along the canvas axes.
pub fn scale_about_pivot(
    transform: &Transform,
    origin: Point,
    pivot: Point,
    factor_x: f64,
    factor_y: f64,
    canvas: &Canvas,
) -> Transform {
    let moved = Point::new(
        pivot.x + (origin.x - pivot.x) * factor_x,
        pivot.y + (origin.y - pivot.y) * factor_y,
    );
    let mut result = translate_by(transform, moved.x - origin.x, moved.y - origin.y, canvas);
    result.scale_x = transform.scale_x * factor_x;
    result.scale_y = transform.scale_y * factor_y;
    result
}

/// Grab every selected strip by a pixel delta.
///
/// Transform strips move their position. Translated sources move their
/// offset. Sources without translation are pinned to the canvas and are
/// left out.
pub fn grab_selection(
    graph: &StripGraph,
    selection: &[StripId],
    dx: f64,
    dy: f64,
    canvas: &Canvas,
) -> Result<Vec<(StripId, StripUpdate)>, GeometryError> {
    let mut updates = Vec::with_capacity(selection.len());
    for &id in selection {
        match &graph.get(id)?.kind {
            StripKind::Transform(node) => updates.push((
                id,
                StripUpdate::Transform(translate_by(&node.transform, dx, dy, canvas)),
            )),
            StripKind::Source(source) if source.use_translation => updates.push((
                id,
                StripUpdate::Offset {
                    x: source.offset_x + dx,
                    y: source.offset_y + dy,
                },
            )),
            StripKind::Source(_) => debug!(index = id.index(), "untranslated source not grabbed"),
        }
    }
    Ok(updates)
}

/// Rotate the selected transform strips around a canvas-centered pivot,
/// or around their own origins when `pivot` is `None`.
pub fn rotate_selection(
    graph: &StripGraph,
    selection: &[StripId],
    pivot: Option<Point>,
    angle_degrees: f64,
    canvas: &Canvas,
) -> Result<Vec<(StripId, StripUpdate)>, GeometryError> {
    let mut updates = Vec::with_capacity(selection.len());
    for &id in selection {
        let Some(node) = graph.get(id)?.as_transform() else {
            continue;
        };
        let origin = transform_box(graph, id, canvas)?.center();
        let pivot = pivot.map(|p| canvas.from_centered(p)).unwrap_or(origin);
        updates.push((
            id,
            StripUpdate::Transform(rotate_about_pivot(
                &node.transform,
                origin,
                pivot,
                angle_degrees,
                canvas,
            )),
        ));
    }
    Ok(updates)
}

/// Scale the selected transform strips around a canvas-centered pivot,
/// or around their own origins when `pivot` is `None`.
pub fn scale_selection(
    graph: &StripGraph,
    selection: &[StripId],
    pivot: Option<Point>,
    factor_x: f64,
    factor_y: f64,
    canvas: &Canvas,
) -> Result<Vec<(StripId, StripUpdate)>, GeometryError> {
    let mut updates = Vec::with_capacity(selection.len());
    for &id in selection {
        let Some(node) = graph.get(id)?.as_transform() else {
            continue;
        };
        let origin = transform_box(graph, id, canvas)?.center();
        let pivot = pivot.map(|p| canvas.from_centered(p)).unwrap_or(origin);
        updates.push((
            id,
            StripUpdate::Transform(scale_about_pivot(
                &node.transform,
                origin,
                pivot,
                factor_x,
                factor_y,
                canvas,
            )),
        ));
    }
    Ok(updates)
}
