//! Geometric primitives used by the plotting pipeline.
//!
//! [`Point`] lives in plot space. [`ScreenPoint`] and [`ScreenRect`] are pixel
//! coordinates handed to renderers, with Y growing downwards.

/// A point in plot space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X value in plot coordinates.
    pub x: f64,
    /// Y value in plot coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new plot-space point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its top-left corner and size.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Grow the rectangle by `amount` pixels on every side.
    pub fn inflated(&self, amount: f32) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x - amount, self.min.y - amount),
            ScreenPoint::new(self.max.x + amount, self.max.y + amount),
        )
    }
}
