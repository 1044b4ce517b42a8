//! Fit the canvas to the visible strips.
//!
//! The new canvas is the group box of the visible strips. Every strip that
//! can be moved is repositioned so nothing shifts on screen relative to the
//! new canvas origin.

use crate::geometry::{group_box, input_frame};
use crate::strip::{StripGraph, StripId, StripKind, StripUpdate};
use crate::types::{Canvas, GeometryError, Point, Rect, Transform};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Canvas change plus the strip updates that go with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocropPlan {
    pub canvas: Canvas,
    /// Position of the new canvas origin in the old canvas.
    pub shift: Point,
    #[serde(skip)]
    pub updates: Vec<(StripId, StripUpdate)>,
    /// Sources pinned to the canvas, which cannot follow the crop.
    #[serde(skip)]
    pub skipped: Vec<StripId>,
}

impl AutocropPlan {
    /// Write all updates to the graph.
    pub fn apply(&self, graph: &mut StripGraph) -> Result<(), GeometryError> {
        for &(id, update) in &self.updates {
            graph.apply_update(id, update)?;
        }
        Ok(())
    }
}

/// Compute the canvas that tightly fits `visible` and the updates that keep
/// each strip in place.
///
/// The new size is rounded up to whole pixels.
pub fn plan_autocrop(
    graph: &StripGraph,
    visible: &[StripId],
    canvas: &Canvas,
) -> Result<AutocropPlan, GeometryError> {
    if visible.is_empty() {
        return Err(GeometryError::EmptySelection);
    }

    let group = group_box(graph, visible, canvas)?;
    let new_canvas = Canvas::new(group.width().ceil().max(1.0), group.height().ceil().max(1.0));
    let shift = Point::new(group.left, group.bottom);

    let mut updates = Vec::with_capacity(visible.len());
    let mut skipped = Vec::new();

    for &id in visible {
        match &graph.get(id)?.kind {
            StripKind::Source(source) if source.use_translation => updates.push((
                id,
                StripUpdate::Offset {
                    x: source.offset_x - shift.x,
                    y: source.offset_y - shift.y,
                },
            )),
            StripKind::Source(_) => {
                debug!(index = id.index(), "source is pinned to the canvas, not repositioned");
                skipped.push(id);
            }
            StripKind::Transform(node) => {
                let input = graph.get(node.input)?;
                let unstretched = matches!(&input.kind, StripKind::Source(s) if s.use_translation);
                let transform = if unstretched {
                    reposition_unstretched(&node.transform, shift, canvas, &new_canvas)
                } else {
                    let old_frame = input_frame(graph, input, canvas)?.rect;
                    let new_frame = input_frame(graph, input, &new_canvas)?.rect;
                    reposition_stretched(
                        &node.transform,
                        old_frame,
                        new_frame,
                        shift,
                        canvas,
                        &new_canvas,
                    )
                };
                updates.push((id, StripUpdate::Transform(transform)));
            }
        }
    }

    Ok(AutocropPlan {
        canvas: new_canvas,
        shift,
        updates,
        skipped,
    })
}

/// Transform over a translated source: the source keeps its pixel size,
/// only the canvas-sized frame it sits in moves with the canvas center.
fn reposition_unstretched(
    transform: &Transform,
    shift: Point,
    old_canvas: &Canvas,
    new_canvas: &Canvas,
) -> Transform {
    let (x, y) = transform.position_pixels(old_canvas);
    let (scale_x, scale_y) = transform.effective_scale();
    let old_center = old_canvas.center();
    let new_center = new_canvas.center();

    let mut result = *transform;
    result.set_position_pixels(
        x - shift.x + (old_center.x - new_center.x) * (1.0 - scale_x),
        y - shift.y + (old_center.y - new_center.y) * (1.0 - scale_y),
        new_canvas,
    );
    result
}

/// Transform over an input stretched to its frame: keep the box center
/// fixed relative to the new origin and compensate scale for the frame
/// size change.
fn reposition_stretched(
    transform: &Transform,
    old_frame: Rect,
    new_frame: Rect,
    shift: Point,
    old_canvas: &Canvas,
    new_canvas: &Canvas,
) -> Transform {
    let (x, y) = transform.position_pixels(old_canvas);
    let old_frame_center = old_frame.center();
    let new_frame_center = new_frame.center();
    let origin = Point::new(old_frame_center.x + x - shift.x, old_frame_center.y + y - shift.y);

    let mut result = *transform;
    if new_frame.width() > 0.0 && new_frame.height() > 0.0 {
        result.scale_x = transform.scale_x * old_frame.width() / new_frame.width();
        result.scale_y = transform.scale_y * old_frame.height() / new_frame.height();
    }
    result.set_position_pixels(
        origin.x - new_frame_center.x,
        origin.y - new_frame_center.y,
        new_canvas,
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{corner_bounds, resolve_box};
    use crate::strip::SourceStrip;
    use crate::types::TranslationUnit;

    fn assert_rect_close(a: Rect, b: Rect) {
        assert!(
            (a.left - b.left).abs() < 1e-9
                && (a.right - b.right).abs() < 1e-9
                && (a.bottom - b.bottom).abs() < 1e-9
                && (a.top - b.top).abs() < 1e-9,
            "expected {:?}, got {:?}",
            b,
            a
        );
    }

    #[test]
    fn test_empty_selection() {
        let graph = StripGraph::new();
        assert_eq!(
            plan_autocrop(&graph, &[], &Canvas::default()),
            Err(GeometryError::EmptySelection)
        );
    }

    #[test]
    fn test_autocrop_keeps_strips_in_place() {
        let canvas = Canvas::new(1920.0, 1080.0);
        let mut graph = StripGraph::new();
        let clip = graph.add_source(
            "clip",
            SourceStrip::sized(640.0, 480.0).with_offset(100.0, 50.0),
        );
        let backdrop = graph.add_source("backdrop", SourceStrip::sized(1920.0, 1080.0));
        let mut transform = Transform::new();
        transform.scale_x = 0.25;
        transform.scale_y = 0.25;
        transform.translate_x = 500.0;
        let t = graph.add_transform("t", backdrop, transform).unwrap();

        let before_t = resolve_box(&graph, t, &canvas).unwrap();
        let plan = plan_autocrop(&graph, &[clip, t], &canvas).unwrap();

        assert_eq!(plan.canvas, Canvas::new(1600.0, 625.0));
        assert_eq!(plan.shift, Point::new(100.0, 50.0));
        assert!(plan.skipped.is_empty());

        plan.apply(&mut graph).unwrap();
        assert_eq!(
            resolve_box(&graph, clip, &plan.canvas).unwrap(),
            Rect::new(0.0, 640.0, 0.0, 480.0)
        );
        assert_rect_close(
            resolve_box(&graph, t, &plan.canvas).unwrap(),
            before_t.translated(-100.0, -50.0),
        );
    }

    #[test]
    fn test_autocrop_transform_over_translated_source() {
        let canvas = Canvas::new(200.0, 200.0);
        let mut graph = StripGraph::new();
        let src = graph.add_source("clip", SourceStrip::sized(50.0, 50.0).with_offset(0.0, 0.0));
        let mut transform = Transform::new();
        transform.scale_x = 2.0;
        transform.scale_y = 2.0;
        transform.translate_x = 10.0;
        let t = graph.add_transform("t", src, transform).unwrap();

        let plan = plan_autocrop(&graph, &[t], &canvas).unwrap();
        assert_eq!(plan.canvas, Canvas::new(100.0, 100.0));

        plan.apply(&mut graph).unwrap();
        assert_rect_close(
            corner_bounds(&graph, t, &plan.canvas).unwrap(),
            Rect::new(0.0, 100.0, 0.0, 100.0),
        );
    }

    #[test]
    fn test_autocrop_percent_units() {
        let canvas = Canvas::new(1000.0, 1000.0);
        let mut graph = StripGraph::new();
        let src = graph.add_source("color", SourceStrip::default());
        let mut transform = Transform::new();
        transform.translation_unit = TranslationUnit::Percent;
        transform.scale_x = 0.5;
        transform.scale_y = 0.5;
        transform.translate_x = 10.0;
        let t = graph.add_transform("t", src, transform).unwrap();

        let plan = plan_autocrop(&graph, &[t], &canvas).unwrap();
        assert_eq!(plan.canvas, Canvas::new(500.0, 500.0));
        let StripUpdate::Transform(result) = plan.updates[0].1 else {
            panic!("expected transform update");
        };
        assert_eq!(result.translation_unit, TranslationUnit::Percent);
        // Frame shrinks to the new canvas, so the scale grows to compensate
        assert!((result.scale_x - 1.0).abs() < 1e-12);
        assert!(result.translate_x.abs() < 1e-9);
    }

    #[test]
    fn test_pinned_source_is_skipped() {
        let canvas = Canvas::new(1920.0, 1080.0);
        let mut graph = StripGraph::new();
        let pinned = graph.add_source("pinned", SourceStrip::sized(1920.0, 1080.0));
        let plan = plan_autocrop(&graph, &[pinned], &canvas).unwrap();
        assert_eq!(plan.skipped, vec![pinned]);
        assert!(plan.updates.is_empty());
        assert_eq!(plan.canvas, canvas);
    }
}
