//! Union bounding box over a selection of strips.

use super::boxes::strip_box;
use super::corners::corner_bounds;
use crate::strip::{StripGraph, StripId, StripKind};
use crate::types::{Canvas, GeometryError, Rect};

/// Starting value of the running min/max: the canvas bounds, inverted.
///
/// An empty selection returns this box unchanged (`left > right`), so
/// callers must check for an empty selection before trusting the result.
pub fn empty_group_box(canvas: &Canvas) -> Rect {
    Rect::new(canvas.width, 0.0, canvas.height, 0.0)
}

/// Grow a group box to include another box.
#[inline]
pub fn extend_group_box(group: Rect, other: Rect) -> Rect {
    Rect::new(
        group.left.min(other.left),
        group.right.max(other.right),
        group.bottom.min(other.bottom),
        group.top.max(other.top),
    )
}

/// Compute the bounding box of several strips.
///
/// Transform strips contribute the box around their rotated, flipped
/// corners; source strips contribute their strip box.
pub fn group_box(
    graph: &StripGraph,
    ids: &[StripId],
    canvas: &Canvas,
) -> Result<Rect, GeometryError> {
    let mut group = empty_group_box(canvas);
    for &id in ids {
        let member = match &graph.get(id)?.kind {
            StripKind::Transform(_) => corner_bounds(graph, id, canvas)?,
            StripKind::Source(source) => strip_box(source, canvas),
        };
        group = extend_group_box(group, member);
    }
    Ok(group)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-3000.0f64..3000.0, 0.0f64..3000.0, -3000.0f64..3000.0, 0.0f64..3000.0)
            .prop_map(|(left, w, bottom, h)| Rect::new(left, left + w, bottom, bottom + h))
    }

    proptest! {
        /// Property: adding a member never shrinks the group box.
        #[test]
        fn prop_group_box_monotonic(
            members in prop::collection::vec(rect_strategy(), 0..8),
            extra in rect_strategy(),
        ) {
            let canvas = Canvas::new(1920.0, 1080.0);
            let old = members
                .iter()
                .fold(empty_group_box(&canvas), |group, r| extend_group_box(group, *r));
            let new = extend_group_box(old, extra);

            prop_assert!(new.left <= old.left);
            prop_assert!(new.right >= old.right);
            prop_assert!(new.bottom <= old.bottom);
            prop_assert!(new.top >= old.top);
        }

        /// Property: every non-empty group box contains all its members.
        #[test]
        fn prop_group_box_contains_members(
            members in prop::collection::vec(rect_strategy(), 1..8),
        ) {
            let canvas = Canvas::new(1920.0, 1080.0);
            let group = members
                .iter()
                .fold(empty_group_box(&canvas), |group, r| extend_group_box(group, *r));
            for r in &members {
                prop_assert!(group.left <= r.left && group.right >= r.right);
                prop_assert!(group.bottom <= r.bottom && group.top >= r.top);
            }
        }
    }
}
