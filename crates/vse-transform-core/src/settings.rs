//! Tool settings shared by the interactive operators.

use crate::pivot::PivotMode;
use crate::types::GeometryError;
use serde::{Deserialize, Serialize};

/// Host-provided configuration for the transform tools.
///
/// Every field has a default, so hosts can send partial objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Proxy/resolution multiplier applied to source sizes (1.0 = full size).
    pub proxy_factor: f64,
    /// Distance in canvas pixels within which grabbing snaps to edges.
    pub snap_threshold: f64,
    pub pivot_mode: PivotMode,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            proxy_factor: 1.0,
            snap_threshold: 10.0,
            pivot_mode: PivotMode::MedianPoint,
        }
    }
}

impl ToolSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.proxy_factor.is_finite() && self.proxy_factor > 0.0) {
            return Err(GeometryError::InvalidSetting {
                field: "proxy_factor",
                value: self.proxy_factor,
            });
        }
        if !(self.snap_threshold.is_finite() && self.snap_threshold >= 0.0) {
            return Err(GeometryError::InvalidSetting {
                field: "snap_threshold",
                value: self.snap_threshold,
            });
        }
        Ok(())
    }
}
