//! Interactive pan and zoom.
//!
//! Pointer input is applied to the previous frame's viewport through the
//! previous frame's plot screen, so a drag moves the data exactly with the
//! cursor.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;
use crate::view::{Range, Viewport};

/// Base of the exponential wheel zoom.
const ZOOM_BASE: f64 = 1.2;

/// Pointer state collected since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    /// Cursor position in window pixels, if the cursor is over the window.
    pub position: Option<ScreenPoint>,
    /// Pixel distance dragged with the primary button held.
    pub drag: ScreenPoint,
    /// Wheel movement in notches; positive zooms in.
    pub wheel: f32,
    /// Keep the X range width while zooming.
    pub lock_x_zoom: bool,
    /// Keep the Y range width while zooming.
    pub lock_y_zoom: bool,
}

impl PointerInput {
    /// Check whether the input moves the viewport at all.
    pub fn is_idle(&self) -> bool {
        self.wheel == 0.0 && self.drag == ScreenPoint::default()
    }

    /// Fold another batch of input into this one.
    pub fn accumulate(&mut self, other: PointerInput) {
        if other.position.is_some() {
            self.position = other.position;
        }
        self.drag.x += other.drag.x;
        self.drag.y += other.drag.y;
        self.wheel += other.wheel;
        self.lock_x_zoom = other.lock_x_zoom;
        self.lock_y_zoom = other.lock_y_zoom;
    }
}

/// Settings for [`interactive_update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSettings {
    /// Pivot on a coordinate axis closer than this many pixels to the cursor.
    pub snap_px: f32,
    /// One wheel notch zooms by `1.2^scale`.
    pub scale: f64,
}

/// Apply one frame of pointer input to the viewport.
///
/// Per axis: `new = factor * (old - pivot) + pivot + pan`.
pub fn interactive_update(
    viewport: Viewport,
    screen: ScreenRect,
    input: &PointerInput,
    settings: ZoomSettings,
) -> Viewport {
    if input.is_idle() || !screen.is_valid() {
        return viewport;
    }
    let transform = Transform::new(viewport, screen);

    let zoomed = if input.wheel == 0.0 {
        viewport
    } else {
        let factor = ZOOM_BASE.powf(-(input.wheel as f64) * settings.scale);
        let factor_x = if input.lock_x_zoom { 1.0 } else { factor };
        let factor_y = if input.lock_y_zoom { 1.0 } else { factor };
        let center = ScreenPoint::new(
            (screen.min.x + screen.max.x) * 0.5,
            (screen.min.y + screen.max.y) * 0.5,
        );
        let pivot = zoom_pivot(&transform, input.position.unwrap_or(center), settings.snap_px);
        zoom_viewport(viewport, pivot, factor_x, factor_y)
    };
    pan_viewport(zoomed, input.drag, &transform)
}

/// Plot-space zoom pivot under the cursor, snapped onto x=0 or y=0.
fn zoom_pivot(transform: &Transform, cursor: ScreenPoint, snap_px: f32) -> Point {
    let mut pivot = transform.screen_to_data(cursor);
    if (transform.x_to_screen(0.0) - cursor.x).abs() < snap_px {
        pivot.x = 0.0;
    }
    if (transform.y_to_screen(0.0) - cursor.y).abs() < snap_px {
        pivot.y = 0.0;
    }
    pivot
}

/// Pan a viewport by a pixel delta.
fn pan_viewport(viewport: Viewport, delta_pixels: ScreenPoint, transform: &Transform) -> Viewport {
    if delta_pixels == ScreenPoint::default() {
        return viewport;
    }
    let origin = transform.screen_to_data(ScreenPoint::new(0.0, 0.0));
    let shifted = transform.screen_to_data(delta_pixels);
    let dx = origin.x - shifted.x;
    let dy = origin.y - shifted.y;
    Viewport::new(
        Range::new(viewport.x.min + dx, viewport.x.max + dx),
        Range::new(viewport.y.min + dy, viewport.y.max + dy),
    )
}

/// Zoom a viewport around a center point.
fn zoom_viewport(viewport: Viewport, center: Point, factor_x: f64, factor_y: f64) -> Viewport {
    let x_min = center.x + (viewport.x.min - center.x) * factor_x;
    let x_max = center.x + (viewport.x.max - center.x) * factor_x;
    let y_min = center.y + (viewport.y.min - center.y) * factor_y;
    let y_max = center.y + (viewport.y.max - center.y) * factor_y;
    Viewport::new(Range::new(x_min, x_max), Range::new(y_min, y_max))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: ZoomSettings = ZoomSettings {
        snap_px: 20.0,
        scale: 0.5,
    };

    fn screen() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0))
    }

    fn viewport() -> Viewport {
        Viewport::new(Range::new(10.0, 20.0), Range::new(10.0, 20.0))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn idle_input_keeps_viewport() {
        let input = PointerInput {
            position: Some(ScreenPoint::new(50.0, 50.0)),
            ..PointerInput::default()
        };
        assert_eq!(interactive_update(viewport(), screen(), &input, SETTINGS), viewport());
    }

    #[test]
    fn drag_moves_data_with_cursor() {
        let input = PointerInput {
            drag: ScreenPoint::new(10.0, 10.0),
            ..PointerInput::default()
        };
        let panned = interactive_update(viewport(), screen(), &input, SETTINGS);
        assert_close(panned.x.min, 9.0);
        assert_close(panned.x.max, 19.0);
        assert_close(panned.y.min, 11.0);
        assert_close(panned.y.max, 21.0);
    }

    #[test]
    fn wheel_zooms_around_cursor() {
        let input = PointerInput {
            position: Some(ScreenPoint::new(50.0, 50.0)),
            wheel: 2.0,
            ..PointerInput::default()
        };
        let zoomed = interactive_update(viewport(), screen(), &input, SETTINGS);
        let factor = 1.2_f64.powf(-1.0);
        assert_close(zoomed.x.min, 15.0 - 5.0 * factor);
        assert_close(zoomed.x.max, 15.0 + 5.0 * factor);
        assert_close(zoomed.y.span(), 10.0 * factor);
    }

    #[test]
    fn modifier_locks_one_axis() {
        let input = PointerInput {
            position: Some(ScreenPoint::new(50.0, 50.0)),
            wheel: -1.0,
            lock_x_zoom: true,
            ..PointerInput::default()
        };
        let zoomed = interactive_update(viewport(), screen(), &input, SETTINGS);
        assert_eq!(zoomed.x, viewport().x);
        assert!(zoomed.y.span() > 10.0);
    }

    #[test]
    fn pivot_snaps_to_nearby_axis() {
        let viewport = Viewport::new(Range::new(-1.0, 9.0), Range::new(-5.0, 5.0));
        let input = PointerInput {
            position: Some(ScreenPoint::new(15.0, 80.0)),
            wheel: 1.0,
            ..PointerInput::default()
        };
        let zoomed = interactive_update(viewport, screen(), &input, SETTINGS);
        let factor = 1.2_f64.powf(-0.5);
        assert_close(zoomed.x.min, -factor);
        assert_close(zoomed.x.max, 9.0 * factor);
        let pivot_y = -3.0;
        assert_close(zoomed.y.min, factor * (-5.0 - pivot_y) + pivot_y);
    }

    #[test]
    fn accumulate_sums_motion() {
        let mut input = PointerInput::default();
        input.accumulate(PointerInput {
            drag: ScreenPoint::new(1.0, 2.0),
            wheel: 1.0,
            ..PointerInput::default()
        });
        input.accumulate(PointerInput {
            position: Some(ScreenPoint::new(3.0, 3.0)),
            drag: ScreenPoint::new(1.0, 0.0),
            wheel: -0.5,
            ..PointerInput::default()
        });
        assert_eq!(input.drag, ScreenPoint::new(2.0, 2.0));
        assert_eq!(input.wheel, 0.5);
        assert_eq!(input.position, Some(ScreenPoint::new(3.0, 3.0)));
    }
}
