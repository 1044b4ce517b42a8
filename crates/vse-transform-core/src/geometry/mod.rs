//! Strip transform geometry.
//!
//! Pure functions over strip values: nothing here caches or mutates, so
//! every query can be repeated each interactive frame.
//!
//! # Resolvers
//!
//! 1. `rotation` - point rotation and rotated bounding boxes
//! 2. `boxes` - unrotated boxes of source and transform strips
//! 3. `corners` - rotated, flipped outlines
//! 4. `group` - union box over a selection
//! 5. `crop` - scale/position compensation for crop changes
//! 6. `snap` - pivot and grab snapping
//!
//! # Coordinate System
//!
//! - Canvas pixels, origin at the canvas bottom-left, y up
//! - Rotation angles are counter-clockwise
//! - Pivots and snap points are canvas-centered
//!
//! Degenerate geometry never fails: it collapses to [`crate::Rect::ZERO`].

mod boxes;
mod corners;
mod crop;
mod group;
mod rotation;
mod snap;

pub use boxes::{
    apply_transform_to_frame, input_frame, resolve_box, strip_box, strip_box_diagnosed,
    transform_box, transform_box_diagnosed, Degeneracy, Resolution,
};
pub use corners::{
    corner_bounds, flip_corners, strip_corners, BOTTOM_LEFT, BOTTOM_RIGHT, TOP_LEFT, TOP_RIGHT,
};
pub use crop::{crop_request, solve_crop_rescale, CropRescale, CropRescaleRequest};
pub use group::{empty_group_box, extend_group_box, group_box};
pub use rotation::{post_rotation_bounding_box, rotate_corners, rotate_point};
pub use snap::{
    canvas_snap_points, nearest_snap_point, quad_snap_points, snap_candidates, snap_grab,
    snap_pivot, snap_translation,
};
