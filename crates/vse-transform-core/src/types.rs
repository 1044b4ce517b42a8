//! Core value types shared by every resolver.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for structural misuse of the geometry API.
///
/// Degenerate geometry is never an error: resolvers collapse it to
/// [`Rect::ZERO`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The strip id does not belong to this graph.
    #[error("Unknown strip id {0}")]
    UnknownStrip(usize),

    /// A strip description references an input that does not precede it.
    #[error("Strip {index} references invalid input {input}")]
    InvalidInput { index: usize, input: usize },

    /// Canvas dimensions must be finite and positive.
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// The operation needs at least one strip.
    #[error("Selection is empty")]
    EmptySelection,

    /// The operation only applies to transform strips.
    #[error("Strip {0} is not a transform strip")]
    NotATransform(usize),

    /// The operation only applies to source strips.
    #[error("Strip {0} is not a source strip")]
    NotASource(usize),

    /// A tool setting is out of range.
    #[error("Invalid setting {field}: {value}")]
    InvalidSetting { field: &'static str, value: f64 },
}

/// A 2D point in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle with a y-up convention.
///
/// `right >= left` and `top >= bottom` for every rectangle produced by the
/// resolvers. The one exception is the inverted canvas box returned by
/// [`crate::geometry::group_box`] for an empty selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Rect {
    /// The canonical collapsed box.
    pub const ZERO: Rect = Rect {
        left: 0.0,
        right: 0.0,
        bottom: 0.0,
        top: 0.0,
    };

    pub const fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Build a rectangle from its center and size.
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self {
            left: center.x - width / 2.0,
            right: center.x + width / 2.0,
            bottom: center.y - height / 2.0,
            top: center.y + height / 2.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.bottom + self.height() / 2.0,
        )
    }

    /// Returns true if width or height is not strictly positive.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Corners in `[bottom_left, top_left, top_right, bottom_right]` order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.bottom),
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
        ]
    }

    /// Smallest rectangle containing all the given points.
    pub fn enclosing(points: &[Point]) -> Rect {
        let mut rect = Rect::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for p in points {
            rect.left = rect.left.min(p.x);
            rect.right = rect.right.max(p.x);
            rect.bottom = rect.bottom.min(p.y);
            rect.top = rect.top.max(p.y);
        }
        if points.is_empty() {
            Rect::ZERO
        } else {
            rect
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.left + dx,
            self.right + dx,
            self.bottom + dy,
            self.top + dy,
        )
    }
}

/// The output frame every position is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject sizes that would make percentages meaningless.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(GeometryError::InvalidCanvas {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// `[0, width, 0, height]`
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, self.width, 0.0, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert an absolute canvas point to canvas-centered coordinates.
    pub fn to_centered(&self, p: Point) -> Point {
        Point::new(p.x - self.width / 2.0, p.y - self.height / 2.0)
    }

    /// Inverse of [`Canvas::to_centered`].
    pub fn from_centered(&self, p: Point) -> Point {
        Point::new(p.x + self.width / 2.0, p.y + self.height / 2.0)
    }

    pub fn percent_to_pixels(&self, percent_x: f64, percent_y: f64) -> (f64, f64) {
        (
            percent_x * self.width / 100.0,
            percent_y * self.height / 100.0,
        )
    }

    pub fn pixels_to_percent(&self, px: f64, py: f64) -> (f64, f64) {
        (px * 100.0 / self.width, py * 100.0 / self.height)
    }
}

/// Unit of a transform strip's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationUnit {
    #[default]
    Pixels,
    /// Percent of the canvas size.
    Percent,
}

/// Translate/scale/rotate parameters of a transform strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Counter-clockwise, about the strip's own center.
    pub rotation_degrees: f64,
    pub uniform_scale: bool,
    pub translation_unit: TranslationUnit,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation_degrees: 0.0,
            uniform_scale: false,
            translation_unit: TranslationUnit::Pixels,
        }
    }
}

impl Transform {
    /// Create an identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Position in canvas pixels regardless of the translation unit.
    pub fn position_pixels(&self, canvas: &Canvas) -> (f64, f64) {
        match self.translation_unit {
            TranslationUnit::Pixels => (self.translate_x, self.translate_y),
            TranslationUnit::Percent => {
                canvas.percent_to_pixels(self.translate_x, self.translate_y)
            }
        }
    }

    /// Set the position from canvas pixels, converting to the strip's unit.
    pub fn set_position_pixels(&mut self, x: f64, y: f64, canvas: &Canvas) {
        let (tx, ty) = match self.translation_unit {
            TranslationUnit::Pixels => (x, y),
            TranslationUnit::Percent => canvas.pixels_to_percent(x, y),
        };
        self.translate_x = tx;
        self.translate_y = ty;
    }

    /// Scale actually applied, honouring `uniform_scale`.
    pub fn effective_scale(&self) -> (f64, f64) {
        if self.uniform_scale {
            let s = self.scale_x.max(self.scale_y);
            (s, s)
        } else {
            (self.scale_x, self.scale_y)
        }
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }
}

/// Pixel insets measured from the four edges of a source before scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSpec {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl CropSpec {
    pub const fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Same insets with negative values raised to zero.
    pub fn clamped(&self) -> CropSpec {
        CropSpec {
            left: self.left.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
            top: self.top.max(0.0),
        }
    }

    /// Check if no inset is applied
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Mirror flags applied to rendered corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flip {
    pub flip_x: bool,
    pub flip_y: bool,
}
