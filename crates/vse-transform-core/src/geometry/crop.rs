//! Crop-to-scale compensation.
//!
//! Changing the crop of a transform strip's input stretches the remaining
//! image over the same frame. To keep the uncropped region still on screen
//! the transform's scale and position have to follow the crop.
//!
//! # Algorithm
//!
//! Per axis, with `size` the proxy-adjusted source size:
//! ```text
//! factor   = (size - new_a - new_b) / (size - old_a - old_b)
//! scale'   = scale * factor
//! diff     = size * scale' - size * scale
//! shift_a  = diff * delta_a / (delta_a + delta_b)
//! local    = (shift_b - shift_a) / 2 * factor
//! ```
//! The local X/Y offsets are rotated by the strip's rotation before being
//! added to its position.

use crate::strip::{StripGraph, StripId};
use crate::types::{Canvas, CropSpec, GeometryError, Transform};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the solver needs about one transform strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRescaleRequest {
    pub old_crop: CropSpec,
    pub new_crop: CropSpec,
    /// Transform before the crop change.
    pub transform: Transform,
    pub orig_width: f64,
    pub orig_height: f64,
    /// Proxy/resolution multiplier applied to the source size.
    #[serde(default = "default_proxy_factor")]
    pub proxy_factor: f64,
    /// Size of the frame the visible crop is stretched over before the
    /// transform applies. `None` when the source keeps its own pixel size.
    #[serde(default)]
    pub frame: Option<(f64, f64)>,
}

fn default_proxy_factor() -> f64 {
    1.0
}

/// Result of [`solve_crop_rescale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRescale {
    /// Transform with compensated scale and position.
    pub transform: Transform,
    /// Growth factor applied to `scale_x`.
    pub factor_x: f64,
    /// Growth factor applied to `scale_y`.
    pub factor_y: f64,
    /// Crop units covered by one canvas pixel along X, for the compensated
    /// transform.
    pub units_per_pixel_x: f64,
    /// Crop units covered by one canvas pixel along Y.
    pub units_per_pixel_y: f64,
}

/// Growth factor of the visible extent along one axis.
///
/// Zero when the new crop consumes the whole axis. Identity when the old
/// crop already did, since there is no visible extent to compare with.
fn axis_factor(size: f64, old_a: f64, old_b: f64, new_a: f64, new_b: f64) -> f64 {
    let numerator = size - new_a - new_b;
    let denominator = size - old_a - old_b;
    if numerator <= 0.0 {
        return 0.0;
    }
    if denominator <= 0.0 {
        debug!(size, old_a, old_b, "previous crop left nothing visible, keeping scale");
        return 1.0;
    }
    numerator / denominator
}

/// Split an extent change between the two edges of an axis in proportion
/// to how much each edge's crop moved.
fn edge_shifts(diff: f64, delta_a: f64, delta_b: f64) -> (f64, f64) {
    let sum = delta_a + delta_b;
    if sum == 0.0 {
        return (0.0, 0.0);
    }
    (diff * delta_a / sum, diff * delta_b / sum)
}

/// Crop units per canvas pixel along one axis.
///
/// A stretched source spreads its visible part over `frame`, an unstretched
/// one shows each source pixel at `scale` canvas pixels.
fn units_per_pixel(size: f64, crop_a: f64, crop_b: f64, scale: f64, frame: Option<f64>) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    match frame {
        Some(frame) if frame > 0.0 => ((size - crop_a - crop_b) / (frame * scale)).max(0.0),
        Some(_) => 0.0,
        None => 1.0 / scale,
    }
}

/// Recompute scale and position so a crop change keeps the image still.
///
/// An unchanged crop returns the input transform untouched.
pub fn solve_crop_rescale(request: &CropRescaleRequest, canvas: &Canvas) -> CropRescale {
    let old = &request.old_crop;
    let new = &request.new_crop;
    let transform = request.transform;
    let width = request.orig_width * request.proxy_factor;
    let height = request.orig_height * request.proxy_factor;
    let frame_x = request.frame.map(|(w, _)| w);
    let frame_y = request.frame.map(|(_, h)| h);

    if old == new {
        return CropRescale {
            transform,
            factor_x: 1.0,
            factor_y: 1.0,
            units_per_pixel_x: units_per_pixel(
                width,
                new.left,
                new.right,
                transform.scale_x,
                frame_x,
            ),
            units_per_pixel_y: units_per_pixel(
                height,
                new.bottom,
                new.top,
                transform.scale_y,
                frame_y,
            ),
        };
    }

    let factor_x = axis_factor(width, old.left, old.right, new.left, new.right);
    let factor_y = axis_factor(height, old.bottom, old.top, new.bottom, new.top);

    let mut result = transform;
    result.scale_x = transform.scale_x * factor_x;
    result.scale_y = transform.scale_y * factor_y;

    let diff_x = width * result.scale_x - width * transform.scale_x;
    let diff_y = height * result.scale_y - height * transform.scale_y;

    let (shift_left, shift_right) = edge_shifts(diff_x, new.left - old.left, new.right - old.right);
    let (shift_bottom, shift_top) = edge_shifts(diff_y, new.bottom - old.bottom, new.top - old.top);

    let local_x = (shift_right - shift_left) / 2.0 * factor_x;
    let local_y = (shift_top - shift_bottom) / 2.0 * factor_y;

    let (sin, cos) = transform.rotation_radians().sin_cos();
    let dx = local_x * cos - local_y * sin;
    let dy = local_x * sin + local_y * cos;

    let (pos_x, pos_y) = transform.position_pixels(canvas);
    result.set_position_pixels(pos_x + dx, pos_y + dy, canvas);

    CropRescale {
        transform: result,
        factor_x,
        factor_y,
        units_per_pixel_x: units_per_pixel(width, new.left, new.right, result.scale_x, frame_x),
        units_per_pixel_y: units_per_pixel(height, new.bottom, new.top, result.scale_y, frame_y),
    }
}

/// Build a solver request for a transform strip from the graph.
///
/// The old crop is the leaf source's current crop (zero when cropping is
/// off). Sources without an intrinsic size use the canvas size. An
/// untranslated source is stretched over the canvas, which becomes the
/// request's frame.
pub fn crop_request(
    graph: &StripGraph,
    transform_id: StripId,
    new_crop: CropSpec,
    proxy_factor: f64,
    canvas: &Canvas,
) -> Result<CropRescaleRequest, GeometryError> {
    let (node, _) = graph.transform_node(transform_id)?;
    let (_, source) = graph.leaf_of(node.input)?;
    let old_crop = if source.use_crop {
        source.crop
    } else {
        CropSpec::default()
    };
    let (orig_width, orig_height) = source.orig_size.unwrap_or((canvas.width, canvas.height));
    let frame = if source.use_translation {
        None
    } else {
        Some((canvas.width, canvas.height))
    };

    Ok(CropRescaleRequest {
        old_crop,
        new_crop,
        transform: node.transform,
        orig_width,
        orig_height,
        proxy_factor,
        frame,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
