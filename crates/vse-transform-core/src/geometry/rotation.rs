//! Rotation primitives.
//!
//! # Algorithm
//!
//! Rotating point `p` by angle θ about origin `o`:
//! ```text
//! x' = (px - ox) * cos θ - (py - oy) * sin θ + ox
//! y' = (px - ox) * sin θ + (py - oy) * cos θ + oy
//! ```

use crate::types::{Point, Rect};

/// Rotate a point counter-clockwise about an origin.
///
/// # Arguments
///
/// * `point` - Point to rotate
/// * `angle_radians` - Rotation angle (positive = counter-clockwise)
/// * `origin` - Center of rotation
pub fn rotate_point(point: Point, angle_radians: f64, origin: Point) -> Point {
    let (sin, cos) = angle_radians.sin_cos();
    let dx = point.x - origin.x;
    let dy = point.y - origin.y;

    Point::new(
        dx * cos - dy * sin + origin.x,
        dx * sin + dy * cos + origin.y,
    )
}

/// Rotate every corner about the same origin.
pub fn rotate_corners(corners: [Point; 4], angle_radians: f64, origin: Point) -> [Point; 4] {
    if angle_radians == 0.0 {
        return corners;
    }
    corners.map(|corner| rotate_point(corner, angle_radians, origin))
}

/// Compute the axis-aligned box of a rectangle rotated about its own center.
///
/// The sign of the rotation is ignored. The box is padded symmetrically
/// about the original center:
/// ```text
/// new_w = |sin θ| * h + |cos θ| * w
/// new_h = |sin θ| * w + |cos θ| * h
/// ```
///
/// Only valid for rotation about the rectangle's center; for an off-center
/// pivot rotate the corners with [`rotate_point`] instead.
pub fn post_rotation_bounding_box(rect: Rect, rotation_radians: f64) -> Rect {
    let angle = rotation_radians.abs();

    // Fast path: no rotation
    if angle < f64::EPSILON {
        return rect;
    }

    let sin = angle.sin().abs();
    let cos = angle.cos().abs();
    let w = rect.width();
    let h = rect.height();

    let new_w = sin * h + cos * w;
    let new_h = sin * w + cos * h;

    let pad_x = (new_w - w) / 2.0;
    let pad_y = (new_h - h) / 2.0;

    Rect::new(
        rect.left - pad_x,
        rect.right + pad_x,
        rect.bottom - pad_y,
        rect.top + pad_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "expected {:?}, got {:?}",
            b,
            a
        );
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate_point(Point::new(1.0, 0.0), FRAC_PI_2, Point::default());
        assert_point_eq(p, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_rotate_about_offset_origin() {
        let origin = Point::new(10.0, 10.0);
        let p = rotate_point(Point::new(12.0, 10.0), PI, origin);
        assert_point_eq(p, Point::new(8.0, 10.0));
    }

    #[test]
    fn test_rotate_origin_is_fixed() {
        let origin = Point::new(-3.0, 7.5);
        assert_point_eq(rotate_point(origin, 1.234, origin), origin);
    }

    #[test]
    fn test_rotate_corners_zero_is_identity() {
        let corners = Rect::new(0.0, 10.0, 0.0, 5.0).corners();
        assert_eq!(rotate_corners(corners, 0.0, Point::default()), corners);
    }

    #[test]
    fn test_bounding_box_no_rotation() {
        let rect = Rect::new(0.0, 100.0, 0.0, 50.0);
        assert_eq!(post_rotation_bounding_box(rect, 0.0), rect);
    }

    #[test]
    fn test_bounding_box_quarter_turn_swaps() {
        let rect = Rect::new(0.0, 100.0, 0.0, 50.0);
        let rotated = post_rotation_bounding_box(rect, FRAC_PI_2);
        assert!((rotated.width() - 50.0).abs() < 1e-9);
        assert!((rotated.height() - 100.0).abs() < 1e-9);
        assert_point_eq(rotated.center(), rect.center());
    }

    #[test]
    fn test_bounding_box_square_diagonal() {
        let rect = Rect::new(-50.0, 50.0, -50.0, 50.0);
        let rotated = post_rotation_bounding_box(rect, FRAC_PI_4);
        let expected = 100.0 * 2f64.sqrt();
        assert!((rotated.width() - expected).abs() < 1e-9);
        assert!((rotated.height() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_ignores_sign() {
        let rect = Rect::new(0.0, 80.0, 0.0, 30.0);
        assert_eq!(
            post_rotation_bounding_box(rect, 0.3),
            post_rotation_bounding_box(rect, -0.3)
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
