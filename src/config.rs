use std::time::Duration;

use crate::style::Theme;

/// Configuration for a plotting session and its window.
///
/// Construct with struct-update syntax over [`SessionConfig::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in pixels.
    pub window_width: f32,
    /// Initial window height in pixels.
    pub window_height: f32,
    /// Frame rate the render thread paces itself to.
    pub target_fps: u32,
    /// Poll interval of the render thread while the window is hidden.
    pub hidden_poll_interval: Duration,
    /// Horizontal pixels reserved per tick before label widths are known.
    pub x_pixels_per_tick: f32,
    /// Vertical pixels reserved per tick.
    pub y_pixels_per_tick: f32,
    /// The x tick budget is no longer doubled once it reaches this value.
    pub max_pixels_per_tick: f32,
    /// Zooming pivots on x=0 or y=0 when that axis is this close to the cursor.
    pub zoom_snap_px: f32,
    /// One wheel unit zooms by `1.2^scroll_zoom_scale`.
    pub scroll_zoom_scale: f64,
    /// Tick label and legend entry font size.
    pub font_size: f32,
    /// Legend title font size.
    pub title_font_size: f32,
    /// Regular spacing between layout elements.
    pub offset_normal: f32,
    /// Tight spacing between layout elements.
    pub offset_small: f32,
    /// Tick mark length in pixels.
    pub tick_mark_len: f32,
    /// Plot screen border width.
    pub border_width: f32,
    /// Minimum distance between the plot screen and the window edge.
    pub min_screen_offset: f32,
    /// Window colors.
    pub theme: Theme,
}

impl SessionConfig {
    /// Time budget of one frame at the target frame rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title: "Plotlib Window".to_string(),
            window_width: 650.0,
            window_height: 500.0,
            target_fps: 120,
            hidden_poll_interval: Duration::from_millis(1),
            x_pixels_per_tick: 50.0,
            y_pixels_per_tick: 50.0,
            max_pixels_per_tick: 1000.0,
            zoom_snap_px: 20.0,
            scroll_zoom_scale: 0.5,
            font_size: 22.0,
            title_font_size: 24.0,
            offset_normal: 5.0,
            offset_small: 2.0,
            tick_mark_len: 5.0,
            border_width: 1.0,
            min_screen_offset: 8.0,
            theme: Theme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_interval_follows_fps() {
        let config = SessionConfig {
            target_fps: 50,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }
}
