//! Coordinate transforms between plot and screen space.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::Viewport;

/// Linear mapping from a plot-space viewport onto a screen rectangle.
///
/// Screen Y grows downwards, so the viewport's `y.max` lands on the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    viewport: Viewport,
    screen: ScreenRect,
}

impl Transform {
    /// Create a transform for the given viewport and screen rectangle.
    pub fn new(viewport: Viewport, screen: ScreenRect) -> Self {
        Self { viewport, screen }
    }

    /// Access the viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the screen rectangle.
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a plot-space X value to a screen column.
    pub fn x_to_screen(&self, x: f64) -> f32 {
        linear_map(
            x,
            self.viewport.x.min,
            self.viewport.x.max,
            self.screen.min.x as f64,
            self.screen.max.x as f64,
        ) as f32
    }

    /// Map a plot-space Y value to a screen row.
    pub fn y_to_screen(&self, y: f64) -> f32 {
        linear_map(
            y,
            self.viewport.y.min,
            self.viewport.y.max,
            self.screen.max.y as f64,
            self.screen.min.y as f64,
        ) as f32
    }

    /// Map a screen column to a plot-space X value.
    pub fn screen_to_x(&self, x: f32) -> f64 {
        linear_map(
            x as f64,
            self.screen.min.x as f64,
            self.screen.max.x as f64,
            self.viewport.x.min,
            self.viewport.x.max,
        )
    }

    /// Map a screen row to a plot-space Y value.
    pub fn screen_to_y(&self, y: f32) -> f64 {
        linear_map(
            y as f64,
            self.screen.min.y as f64,
            self.screen.max.y as f64,
            self.viewport.y.max,
            self.viewport.y.min,
        )
    }

    /// Map a plot-space point into screen space.
    pub fn data_to_screen(&self, point: Point) -> ScreenPoint {
        ScreenPoint::new(self.x_to_screen(point.x), self.y_to_screen(point.y))
    }

    /// Map a screen point into plot space.
    pub fn screen_to_data(&self, point: ScreenPoint) -> Point {
        Point::new(self.screen_to_x(point.x), self.screen_to_y(point.y))
    }
}

fn linear_map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
