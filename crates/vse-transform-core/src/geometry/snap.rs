//! Snap targets for the pivot cursor and for grabbing strips.
//!
//! Pivot snapping works in canvas-centered coordinates (origin at the
//! canvas center), the same space pivot offsets are stored in.

use super::corners::{corner_bounds, strip_corners, BOTTOM_LEFT, BOTTOM_RIGHT, TOP_LEFT, TOP_RIGHT};
use crate::strip::{StripGraph, StripId};
use crate::types::{Canvas, GeometryError, Point, Rect};

/// Nine snap points of a quad: corners, edge midpoints, center.
///
/// Midpoints and center follow the quad, so a rotated strip snaps to its
/// rotated edges.
pub fn quad_snap_points(corners: [Point; 4]) -> [Point; 9] {
    let bl = corners[BOTTOM_LEFT];
    let tl = corners[TOP_LEFT];
    let tr = corners[TOP_RIGHT];
    let br = corners[BOTTOM_RIGHT];
    [
        bl,
        tl,
        tr,
        br,
        bl.midpoint(tl),
        tl.midpoint(tr),
        tr.midpoint(br),
        br.midpoint(bl),
        bl.midpoint(tr),
    ]
}

/// Nine-point grid of the canvas in canvas-centered coordinates.
pub fn canvas_snap_points(canvas: &Canvas) -> [Point; 9] {
    quad_snap_points(canvas.bounds().corners()).map(|p| canvas.to_centered(p))
}

/// Collect pivot snap candidates for the visible strips.
///
/// Strip points come first, in `visible` order, followed by the canvas grid,
/// so the list is never empty.
pub fn snap_candidates(
    graph: &StripGraph,
    visible: &[StripId],
    canvas: &Canvas,
) -> Result<Vec<Point>, GeometryError> {
    let mut candidates = Vec::with_capacity((visible.len() + 1) * 9);
    for &id in visible {
        let corners = strip_corners(graph, id, canvas)?;
        candidates.extend(quad_snap_points(corners).map(|p| canvas.to_centered(p)));
    }
    candidates.extend(canvas_snap_points(canvas));
    Ok(candidates)
}

/// Closest candidate to `query`. The first of several equally close
/// candidates wins. `None` only for an empty slice.
pub fn nearest_snap_point(candidates: &[Point], query: Point) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for &candidate in candidates {
        let distance = candidate.distance(query);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(point, _)| point)
}

/// Snap a canvas-centered pivot position to the nearest interesting point.
pub fn snap_pivot(
    graph: &StripGraph,
    visible: &[StripId],
    canvas: &Canvas,
    query: Point,
) -> Result<Point, GeometryError> {
    let candidates = snap_candidates(graph, visible, canvas)?;
    Ok(nearest_snap_point(&candidates, query).unwrap_or(query))
}

/// Smallest correction aligning any of `moving` with any of `targets`.
fn snap_axis(moving: [f64; 3], targets: &[f64], threshold: f64) -> f64 {
    let mut best: Option<f64> = None;
    for &m in &moving {
        for &t in targets {
            let correction = t - m;
            if correction.abs() > threshold {
                continue;
            }
            match best {
                Some(b) if correction.abs() >= b.abs() => {}
                _ => best = Some(correction),
            }
        }
    }
    best.unwrap_or(0.0)
}

/// Correction that snaps a moving box's edges or center to target edges
/// or centers.
///
/// Each axis is snapped independently. Returns `(dx, dy)` to add to the
/// drag delta; an axis with nothing within `threshold` pixels gets `0`.
pub fn snap_translation(moving: Rect, targets: &[Rect], threshold: f64) -> (f64, f64) {
    let mut xs = Vec::with_capacity(targets.len() * 3);
    let mut ys = Vec::with_capacity(targets.len() * 3);
    for target in targets {
        let center = target.center();
        xs.extend([target.left, center.x, target.right]);
        ys.extend([target.bottom, center.y, target.top]);
    }

    let center = moving.center();
    (
        snap_axis([moving.left, center.x, moving.right], &xs, threshold),
        snap_axis([moving.bottom, center.y, moving.top], &ys, threshold),
    )
}

/// Snap a grab of `moving` strips by `(dx, dy)` against every other
/// visible strip and the canvas edges. Returns the corrected delta.
pub fn snap_grab(
    graph: &StripGraph,
    moving: &[StripId],
    visible: &[StripId],
    delta: (f64, f64),
    canvas: &Canvas,
    threshold: f64,
) -> Result<(f64, f64), GeometryError> {
    if moving.is_empty() {
        return Ok(delta);
    }

    let mut corners = Vec::with_capacity(moving.len() * 4);
    for &id in moving {
        corners.extend(corner_bounds(graph, id, canvas)?.corners());
    }
    let moved = Rect::enclosing(&corners).translated(delta.0, delta.1);

    let mut targets = vec![canvas.bounds()];
    for &id in visible.iter().filter(|id| !moving.contains(id)) {
        let bounds = corner_bounds(graph, id, canvas)?;
        if !bounds.is_degenerate() {
            targets.push(bounds);
        }
    }

    let (cx, cy) = snap_translation(moved, &targets, threshold);
    Ok((delta.0 + cx, delta.1 + cy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::SourceStrip;
    use crate::types::Transform;

    #[test]
    fn test_single_rect_bottom_left_wins() {
        let canvas = Canvas::new(200.0, 200.0);
        let mut graph = StripGraph::new();
        let a = graph.add_source("a", SourceStrip::sized(100.0, 100.0).with_offset(0.0, 0.0));

        let query = canvas.to_centered(Point::new(5.0, 5.0));
        assert_eq!(query, Point::new(-95.0, -95.0));

        let snapped = snap_pivot(&graph, &[a], &canvas, query).unwrap();
        assert_eq!(snapped, Point::new(-100.0, -100.0));
    }

    #[test]
    fn test_candidates_include_canvas_grid() {
        let canvas = Canvas::new(200.0, 100.0);
        let graph = StripGraph::new();
        let candidates = snap_candidates(&graph, &[], &canvas).unwrap();
        assert_eq!(candidates.len(), 9);
        assert!(candidates.contains(&Point::new(0.0, 0.0)));
        assert!(candidates.contains(&Point::new(100.0, 50.0)));
        assert!(candidates.contains(&Point::new(-100.0, 0.0)));
    }

    #[test]
    fn test_rotated_strip_midpoints_follow_rotation() {
        let canvas = Canvas::new(200.0, 200.0);
        let mut graph = StripGraph::new();
        let src = graph.add_source("src", SourceStrip::default());
        let mut transform = Transform::new();
        transform.scale_x = 0.5;
        transform.scale_y = 0.5;
        transform.rotation_degrees = 90.0;
        let t = graph.add_transform("t", src, transform).unwrap();

        let candidates = snap_candidates(&graph, &[t], &canvas).unwrap();
        // Left edge midpoint of the unrotated box (-50, 0) turns to (0, -50)
        let left_mid = candidates[4];
        assert!(left_mid.x.abs() < 1e-9);
        assert!((left_mid.y + 50.0).abs() < 1e-9);
        // Center stays on the canvas center
        assert!(candidates[8].x.abs() < 1e-9 && candidates[8].y.abs() < 1e-9);
    }

    #[test]
    fn test_nearest_ties_first_wins() {
        let candidates = [Point::new(1.0, 0.0), Point::new(-1.0, 0.0)];
        assert_eq!(
            nearest_snap_point(&candidates, Point::default()),
            Some(Point::new(1.0, 0.0))
        );
        assert_eq!(nearest_snap_point(&[], Point::default()), None);
    }

    #[test]
    fn test_snap_translation_within_threshold() {
        let moving = Rect::new(103.0, 203.0, 0.0, 50.0);
        let targets = [Rect::new(0.0, 100.0, 500.0, 600.0)];
        let (dx, dy) = snap_translation(moving, &targets, 5.0);
        assert_eq!(dx, -3.0);
        assert_eq!(dy, 0.0);
    }

    #[test]
    fn test_snap_translation_prefers_closest() {
        let moving = Rect::new(0.0, 10.0, 0.0, 10.0);
        let targets = [Rect::new(12.0, 20.0, 100.0, 200.0), Rect::new(-1.0, 3.0, 100.0, 200.0)];
        let (dx, _) = snap_translation(moving, &targets, 5.0);
        assert_eq!(dx, -1.0);
    }

    #[test]
    fn test_snap_grab_to_canvas_edge() {
        let canvas = Canvas::new(1920.0, 1080.0);
        let mut graph = StripGraph::new();
        let a = graph.add_source("a", SourceStrip::sized(100.0, 100.0).with_offset(500.0, 100.0));

        let delta = snap_grab(&graph, &[a], &[a], (1314.0, 0.0), &canvas, 10.0).unwrap();
        // Right edge 1914 snaps to the canvas edge at 1920
        assert_eq!(delta, (1320.0, 0.0));
    }

    #[test]
    fn test_snap_grab_off_canvas_strip() {
        let canvas = Canvas::new(1920.0, 1080.0);
        let mut graph = StripGraph::new();
        let a = graph.add_source(
            "a",
            SourceStrip::sized(100.0, 100.0).with_offset(-300.0, 100.0),
        );

        let delta = snap_grab(&graph, &[a], &[a], (195.0, 0.0), &canvas, 10.0).unwrap();
        // Right edge -5 snaps to the canvas left edge at 0
        assert_eq!(delta, (200.0, 0.0));
    }

    #[test]
    fn test_snap_grab_to_other_strip() {
        let canvas = Canvas::new(1920.0, 1080.0);
        let mut graph = StripGraph::new();
        let a = graph.add_source("a", SourceStrip::sized(100.0, 100.0).with_offset(300.0, 300.0));
        let b = graph.add_source("b", SourceStrip::sized(100.0, 100.0).with_offset(700.0, 300.0));

        let delta = snap_grab(&graph, &[a], &[a, b], (298.0, 0.0), &canvas, 5.0).unwrap();
        // Right edge 698 snaps to b's left edge at 700
        assert_eq!(delta, (300.0, 0.0));
    }
}
