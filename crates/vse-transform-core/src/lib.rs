//! VSE Transform Core - strip transform geometry
//!
//! This crate computes where video-sequencer strips land on the output
//! canvas: their boxes, rotated corners and group bounds, plus the math
//! behind the interactive tools (crop compensation, pivot snapping,
//! grab/rotate/scale about a pivot and canvas autocrop).
//!
//! The host owns the strips and the event loop. It describes the current
//! strips as a [`SceneDescription`] (or builds a [`StripGraph`] directly),
//! queries geometry, and writes the returned updates back.

pub mod autocrop;
pub mod geometry;
pub mod pivot;
pub mod scene;
pub mod session;
pub mod settings;
pub mod strip;
pub mod types;

pub use autocrop::{plan_autocrop, AutocropPlan};
pub use geometry::{
    corner_bounds, group_box, nearest_snap_point, resolve_box, snap_pivot, solve_crop_rescale,
    strip_box, strip_corners, transform_box, CropRescale, CropRescaleRequest,
};
pub use pivot::{
    grab_selection, resolve_pivot, rotate_selection, scale_selection, strip_center, PivotMode,
};
pub use scene::{Scene, SceneDescription, StripDescription};
pub use session::{CropEdge, CropSession, CropUpdate};
pub use settings::ToolSettings;
pub use strip::{SourceStrip, Strip, StripGraph, StripId, StripKind, StripUpdate, TransformStrip};
pub use types::{Canvas, CropSpec, Flip, GeometryError, Point, Rect, Transform, TranslationUnit};
