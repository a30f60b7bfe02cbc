//! The consumer side: one render loop per session.
//!
//! Each frame synchronizes the update buffer into the store, derives the
//! viewport, lays out ticks and hands a [`RenderList`] to a renderer. The
//! buffer lock is only held during synchronization, never across drawing.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use crate::axis::{FULL_LABEL_PRECISION, LABEL_PRECISION, TextMeasurer, generate_ticks, layout_x_ticks};
use crate::config::SessionConfig;
use crate::frame::{FrameTicks, build_frame};
use crate::geom::ScreenRect;
use crate::interaction::{PointerInput, ZoomSettings};
use crate::render::{RenderList, Renderer};
use crate::store::Store;
use crate::sync::{SyncStats, synchronize};
use crate::update::UpdateBuffer;
use crate::view::Viewport;
use crate::viewport::derive_viewport;

/// Window state sampled for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Window bounds in pixels.
    pub window: ScreenRect,
    /// Pointer input since the previous frame.
    pub pointer: PointerInput,
}

/// What a surface reports when polled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// The window is ready for a frame.
    Frame(FrameInput),
    /// The user asked to close the window.
    CloseRequested,
}

/// A window the render thread can drive.
pub trait Surface: Renderer {
    /// Create the window.
    fn open(&mut self, config: &SessionConfig);
    /// Destroy the window.
    fn close(&mut self);
    /// Check whether the window exists.
    fn is_open(&self) -> bool;
    /// Collect window events since the last poll.
    fn poll(&mut self) -> SurfaceEvent;
}

/// Result of one [`RenderLoop::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A frame was drawn.
    Drawn,
    /// The window is hidden; nothing was drawn.
    Hidden,
    /// The user closed the window during this step.
    Closed,
}

/// Render-thread state: the committed store and a handle on the shared
/// update buffer.
#[derive(Debug)]
pub struct RenderLoop {
    buffer: Arc<Mutex<UpdateBuffer>>,
    store: Store,
    config: SessionConfig,
}

impl RenderLoop {
    pub(crate) fn new(buffer: Arc<Mutex<UpdateBuffer>>, config: SessionConfig) -> Self {
        Self {
            buffer,
            store: Store::new(),
            config,
        }
    }

    /// Committed state as of the last synchronization.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Check whether the window should be shown.
    pub fn is_window_visible(&self) -> bool {
        self.store.is_window_visible()
    }

    /// Merge all pending producer updates into the store.
    pub fn synchronize(&mut self) -> SyncStats {
        let mut buffer = self.buffer.lock().expect("update buffer lock");
        synchronize(&mut buffer, &mut self.store)
    }

    /// Record that the user closed the window.
    ///
    /// Visibility drops in both the store and the buffer so that the next
    /// `show` call reopens the window. A `show` that arrived since the last
    /// synchronization is kept and reopens the window on the next frame.
    pub fn window_closed(&mut self) {
        self.store.window_visible = false;
        let hidden = self
            .buffer
            .lock()
            .expect("update buffer lock")
            .close_window(self.store.show_requests);
        tracing::info!(reopen_pending = !hidden, "Plot window closed by the user");
    }

    /// Build the render list for one frame and remember its viewport and
    /// plot screen for the next one.
    pub fn prepare_frame(&mut self, input: &FrameInput, measurer: &dyn TextMeasurer) -> RenderList {
        let zoom = ZoomSettings {
            snap_px: self.config.zoom_snap_px,
            scale: self.config.scroll_zoom_scale,
        };
        let viewport = derive_viewport(&self.store, &input.pointer, zoom);
        let ticks = self.layout_ticks(viewport, input.window, measurer);
        let frame = build_frame(
            &self.store,
            viewport,
            &ticks,
            input.window,
            &self.config,
            measurer,
        );
        self.store.viewport = viewport;
        self.store.plot_screen = frame.plot_screen;
        frame.render
    }

    /// Build one frame and hand it to `renderer`.
    pub fn render<R: Renderer>(&mut self, input: &FrameInput, renderer: &mut R) {
        let frame = self.prepare_frame(input, &*renderer);
        renderer.draw(&frame);
    }

    fn layout_ticks(
        &self,
        viewport: Viewport,
        window: ScreenRect,
        measurer: &dyn TextMeasurer,
    ) -> FrameTicks {
        let precision = if self.store.full_precision() {
            FULL_LABEL_PRECISION
        } else {
            LABEL_PRECISION
        };
        FrameTicks {
            x: layout_x_ticks(
                window.width(),
                self.config.x_pixels_per_tick,
                self.config.max_pixels_per_tick,
                viewport.x,
                precision,
                measurer,
                self.config.font_size,
            ),
            y: generate_ticks(
                window.height(),
                self.config.y_pixels_per_tick,
                viewport.y,
                precision,
            ),
        }
    }

    /// Run one iteration of the render thread against `surface`.
    pub fn step<S: Surface>(&mut self, surface: &mut S) -> StepOutcome {
        self.synchronize();

        if !surface.is_open() && self.is_window_visible() {
            surface.open(&self.config);
            tracing::info!(
                title = %self.config.title,
                width = self.config.window_width,
                height = self.config.window_height,
                "Opened plot window"
            );
        }

        if surface.is_open() {
            match surface.poll() {
                SurfaceEvent::CloseRequested => {
                    surface.close();
                    self.window_closed();
                    return StepOutcome::Closed;
                }
                SurfaceEvent::Frame(input) if self.is_window_visible() => {
                    self.render(&input, surface);
                    return StepOutcome::Drawn;
                }
                SurfaceEvent::Frame(_) => {}
            }
        }
        StepOutcome::Hidden
    }

    /// Drive `surface` forever, paced to the configured frame rate while
    /// visible and polling slowly while hidden.
    pub fn run<S: Surface>(mut self, mut surface: S) {
        tracing::info!(fps = self.config.target_fps, "Render thread started");
        loop {
            let started = Instant::now();
            let budget = match self.step(&mut surface) {
                StepOutcome::Drawn => self.config.frame_interval(),
                StepOutcome::Hidden | StepOutcome::Closed => self.config.hidden_poll_interval,
            };
            if let Some(rest) = budget.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ScreenPoint;
    use crate::group::GroupId;
    use crate::headless::HeadlessSurface;
    use crate::series::SeriesId;
    use crate::view::{Range, VisualizationMode};

    fn render_loop() -> (Arc<Mutex<UpdateBuffer>>, RenderLoop) {
        let buffer = Arc::new(Mutex::new(UpdateBuffer::new()));
        let render_loop = RenderLoop::new(Arc::clone(&buffer), SessionConfig::default());
        (buffer, render_loop)
    }

    fn id(index: u32) -> SeriesId {
        SeriesId::new(index).unwrap()
    }

    #[test]
    fn hidden_session_draws_nothing() {
        let (_buffer, mut render_loop) = render_loop();
        let (mut surface, handle) = HeadlessSurface::new();
        assert_eq!(render_loop.step(&mut surface), StepOutcome::Hidden);
        assert!(!handle.is_open());
        assert_eq!(handle.frames(), 0);
    }

    #[test]
    fn show_opens_and_draws() {
        let (buffer, mut render_loop) = render_loop();
        let (mut surface, handle) = HeadlessSurface::new();
        {
            let mut buffer = buffer.lock().unwrap();
            buffer.append_numbers(id(0), &[1.0, 2.0, 3.0]).unwrap();
            buffer.show_series(id(0));
        }

        assert_eq!(render_loop.step(&mut surface), StepOutcome::Drawn);
        assert!(handle.is_open());
        assert_eq!(handle.frames(), 1);
        let frame = handle.last_frame().expect("frame");
        assert!(frame.texts().any(|text| text == "[0]"));
        assert_eq!(
            render_loop.store().viewport(),
            Viewport::new(Range::new(0.0, 2.0), Range::new(1.0, 3.0))
        );
        assert!(render_loop.store().plot_screen().is_valid());
    }

    #[test]
    fn close_hides_until_shown_again() {
        let (buffer, mut render_loop) = render_loop();
        let (mut surface, handle) = HeadlessSurface::new();
        buffer.lock().unwrap().set_window_visible(true);
        assert_eq!(render_loop.step(&mut surface), StepOutcome::Drawn);

        handle.request_close();
        assert_eq!(render_loop.step(&mut surface), StepOutcome::Closed);
        assert!(!handle.is_open());
        assert!(!buffer.lock().unwrap().window_visible());
        assert_eq!(render_loop.step(&mut surface), StepOutcome::Hidden);

        buffer.lock().unwrap().set_window_visible(true);
        assert_eq!(render_loop.step(&mut surface), StepOutcome::Drawn);
        assert_eq!(handle.times_opened(), 2);
    }

    #[test]
    fn show_racing_a_close_is_kept() {
        let (buffer, mut render_loop) = render_loop();
        let (mut surface, _handle) = HeadlessSurface::new();
        buffer.lock().unwrap().set_window_visible(true);
        assert_eq!(render_loop.step(&mut surface), StepOutcome::Drawn);

        render_loop.synchronize();
        buffer.lock().unwrap().show_group(GroupId::DEFAULT);
        render_loop.window_closed();
        assert!(buffer.lock().unwrap().window_visible());
        assert!(!render_loop.is_window_visible());

        render_loop.synchronize();
        assert!(render_loop.is_window_visible());
    }

    #[test]
    fn interactive_drag_uses_previous_frame() {
        let (buffer, mut render_loop) = render_loop();
        let (mut surface, handle) = HeadlessSurface::new();
        {
            let mut buffer = buffer.lock().unwrap();
            buffer.append_numbers(id(0), &[0.0, 10.0]).unwrap();
            buffer.show_series(id(0));
        }
        render_loop.step(&mut surface);
        let fitted = render_loop.store().viewport();

        buffer.lock().unwrap().set_mode(VisualizationMode::Interactive);
        handle.push_pointer(PointerInput {
            drag: ScreenPoint::new(0.0, 0.0),
            wheel: 0.0,
            ..PointerInput::default()
        });
        render_loop.step(&mut surface);
        assert_eq!(render_loop.store().viewport(), fitted);

        let plot_screen = render_loop.store().plot_screen();
        handle.push_pointer(PointerInput {
            drag: ScreenPoint::new(plot_screen.width(), 0.0),
            ..PointerInput::default()
        });
        render_loop.step(&mut surface);
        let panned = render_loop.store().viewport();
        assert!((panned.x.min - (fitted.x.min - fitted.x.span())).abs() < 1e-6);
        assert_eq!(panned.y, fitted.y);
    }

    #[test]
    fn full_precision_is_mirrored() {
        let (buffer, mut render_loop) = render_loop();
        buffer.lock().unwrap().set_full_precision(true);
        render_loop.synchronize();
        assert!(render_loop.store().full_precision());
    }
}
