//! Rotated, flipped corners of a strip.
//!
//! Corners are always returned as `[bottom_left, top_left, top_right,
//! bottom_right]`, a clockwise loop in y-up space. Overlay drawing and
//! hit-testing rely on that order.

use super::boxes::{apply_transform_to_frame, input_frame, map_into_transform, strip_box};
use super::rotation::rotate_corners;
use crate::strip::{StripGraph, StripId, StripKind};
use crate::types::{Canvas, Flip, GeometryError, Point, Rect};

/// Corner slot indices.
pub const BOTTOM_LEFT: usize = 0;
pub const TOP_LEFT: usize = 1;
pub const TOP_RIGHT: usize = 2;
pub const BOTTOM_RIGHT: usize = 3;

/// Mirror corners about the canvas center.
///
/// Slots are reordered after mirroring so the loop keeps its clockwise
/// winding and `BOTTOM_LEFT` stays at the visual bottom-left of an
/// unrotated strip. Applying the same flip twice restores the input.
pub fn flip_corners(corners: [Point; 4], flip: Flip, canvas: &Canvas) -> [Point; 4] {
    let mut out = corners;
    if flip.flip_x {
        out = out.map(|p| Point::new(canvas.width - p.x, p.y));
        out = [out[3], out[2], out[1], out[0]];
    }
    if flip.flip_y {
        out = out.map(|p| Point::new(p.x, canvas.height - p.y));
        out = [out[1], out[0], out[3], out[2]];
    }
    out
}

/// Compute the four corners of a strip as rendered on the canvas.
///
/// For a transform strip the unrotated box comes from the transform box
/// resolver and is rotated about its center. When the input is a
/// translated source, only the source's own box inside the canvas-sized
/// frame is visible, so that box is mapped through the transform and
/// rotated about the frame center instead.
///
/// Source strips are never rotated. Flip is applied last. A collapsed
/// strip yields four copies of the origin.
pub fn strip_corners(
    graph: &StripGraph,
    id: StripId,
    canvas: &Canvas,
) -> Result<[Point; 4], GeometryError> {
    let strip = graph.get(id)?;

    let corners = match &strip.kind {
        StripKind::Source(source) => {
            let rect = strip_box(source, canvas);
            if rect.is_degenerate() {
                return Ok(Rect::ZERO.corners());
            }
            rect.corners()
        }
        StripKind::Transform(node) => {
            let input = graph.get(node.input)?;
            let frame = input_frame(graph, input, canvas)?;
            if frame.degenerate.is_some() {
                return Ok(Rect::ZERO.corners());
            }
            let resolved = apply_transform_to_frame(frame.rect, &node.transform, canvas);
            if resolved.degenerate.is_some() {
                return Ok(Rect::ZERO.corners());
            }
            let origin = resolved.rect.center();

            let content = match &input.kind {
                StripKind::Source(source) if source.use_translation => {
                    let inner = strip_box(source, canvas);
                    if inner.is_degenerate() {
                        return Ok(Rect::ZERO.corners());
                    }
                    inner
                        .corners()
                        .map(|p| map_into_transform(p, frame.rect, &node.transform, canvas))
                }
                _ => resolved.rect.corners(),
            };

            rotate_corners(content, node.transform.rotation_radians(), origin)
        }
    };

    Ok(flip_corners(corners, strip.flip, canvas))
}

/// Axis-aligned box enclosing a strip's rendered corners.
pub fn corner_bounds(
    graph: &StripGraph,
    id: StripId,
    canvas: &Canvas,
) -> Result<Rect, GeometryError> {
    Ok(Rect::enclosing(&strip_corners(graph, id, canvas)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::SourceStrip;
    use crate::types::Transform;

    const HD: Canvas = Canvas::new(1920.0, 1080.0);

    fn assert_corners_eq(actual: [Point; 4], expected: [Point; 4]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!(
                (a.x - e.x).abs() < 1e-9 && (a.y - e.y).abs() < 1e-9,
                "expected {:?}, got {:?}",
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_source_corners_unrotated() {
        let mut graph = StripGraph::new();
        let src = graph.add_source("clip", SourceStrip::sized(100.0, 50.0).with_offset(10.0, 20.0));
        let corners = strip_corners(&graph, src, &HD).unwrap();
        assert_corners_eq(
            corners,
            [
                Point::new(10.0, 20.0),
                Point::new(10.0, 70.0),
                Point::new(110.0, 70.0),
                Point::new(110.0, 20.0),
            ],
        );
    }

    #[test]
    fn test_transform_corners_rotated_quarter_turn() {
        let canvas = Canvas::new(200.0, 100.0);
        let mut graph = StripGraph::new();
        let src = graph.add_source("clip", SourceStrip::default());
        let mut transform = Transform::new();
        transform.rotation_degrees = 90.0;
        let t = graph.add_transform("t", src, transform).unwrap();

        // Box [0, 200, 0, 100] rotated about (100, 50)
        let corners = strip_corners(&graph, t, &canvas).unwrap();
        assert_corners_eq(
            corners,
            [
                Point::new(150.0, -50.0),
                Point::new(50.0, -50.0),
                Point::new(50.0, 150.0),
                Point::new(150.0, 150.0),
            ],
        );
    }

    #[test]
    fn test_transform_over_translated_source_maps_inner_box() {
        let canvas = Canvas::new(200.0, 200.0);
        let mut graph = StripGraph::new();
        let src = graph.add_source("clip", SourceStrip::sized(50.0, 50.0).with_offset(0.0, 0.0));
        let mut transform = Transform::new();
        transform.scale_x = 2.0;
        transform.scale_y = 2.0;
        transform.translate_x = 10.0;
        let t = graph.add_transform("t", src, transform).unwrap();

        // Canvas frame scaled about (100, 100) then moved 10 px right
        let corners = strip_corners(&graph, t, &canvas).unwrap();
        assert_corners_eq(
            corners,
            [
                Point::new(-90.0, -100.0),
                Point::new(-90.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, -100.0),
            ],
        );
    }

    #[test]
    fn test_rotation_about_frame_center_for_translated_source() {
        let canvas = Canvas::new(200.0, 200.0);
        let mut graph = StripGraph::new();
        let src = graph.add_source("clip", SourceStrip::sized(50.0, 50.0).with_offset(0.0, 0.0));
        let mut transform = Transform::new();
        transform.rotation_degrees = 180.0;
        let t = graph.add_transform("t", src, transform).unwrap();

        let bounds = corner_bounds(&graph, t, &canvas).unwrap();
        assert!((bounds.left - 150.0).abs() < 1e-9);
        assert!((bounds.right - 200.0).abs() < 1e-9);
        assert!((bounds.bottom - 150.0).abs() < 1e-9);
        assert!((bounds.top - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_flip_x_mirrors_and_keeps_winding() {
        let canvas = Canvas::new(100.0, 100.0);
        let corners = Rect::new(10.0, 30.0, 0.0, 20.0).corners();
        let flipped = flip_corners(
            corners,
            Flip {
                flip_x: true,
                flip_y: false,
            },
            &canvas,
        );
        assert_corners_eq(flipped, Rect::new(70.0, 90.0, 0.0, 20.0).corners());
    }

    #[test]
    fn test_flip_y_mirrors_and_keeps_winding() {
        let canvas = Canvas::new(100.0, 100.0);
        let corners = Rect::new(10.0, 30.0, 0.0, 20.0).corners();
        let flipped = flip_corners(
            corners,
            Flip {
                flip_x: false,
                flip_y: true,
            },
            &canvas,
        );
        assert_corners_eq(flipped, Rect::new(10.0, 30.0, 80.0, 100.0).corners());
    }

    #[test]
    fn test_flip_applied_after_rotation() {
        let canvas = Canvas::new(200.0, 100.0);
        let mut graph = StripGraph::new();
        let src = graph.add_source("clip", SourceStrip::default());
        let mut transform = Transform::new();
        transform.scale_x = 0.5;
        transform.scale_y = 0.5;
        transform.translate_x = -50.0;
        transform.rotation_degrees = 30.0;
        let t = graph.add_transform("t", src, transform).unwrap();

        let unflipped = strip_corners(&graph, t, &canvas).unwrap();
        graph
            .set_flip(
                t,
                Flip {
                    flip_x: true,
                    flip_y: false,
                },
            )
            .unwrap();
        let flipped = strip_corners(&graph, t, &canvas).unwrap();

        for (i, p) in flipped.iter().enumerate() {
            let source = unflipped[3 - i];
            assert!((p.x - (200.0 - source.x)).abs() < 1e-9);
            assert!((p.y - source.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_collapsed_transform_has_zero_corners() {
        let mut graph = StripGraph::new();
        let src = graph.add_source("clip", SourceStrip::default());
        let mut transform = Transform::new();
        transform.scale_x = 0.0;
        let t = graph.add_transform("t", src, transform).unwrap();
        assert_eq!(strip_corners(&graph, t, &HD).unwrap(), Rect::ZERO.corners());
    }
}
