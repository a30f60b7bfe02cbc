//! Display-less surface.
//!
//! Runs the full render pipeline without a windowing system. A
//! [`HeadlessHandle`] observes frames from other threads and scripts pointer
//! input or a user close.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::axis::TextMeasurer;
use crate::config::SessionConfig;
use crate::geom::ScreenRect;
use crate::interaction::PointerInput;
use crate::render::{RenderList, Renderer};
use crate::render_loop::{FrameInput, Surface, SurfaceEvent};

/// Glyph advance as a fraction of the font size.
const GLYPH_ASPECT: f32 = 0.5;

#[derive(Debug, Default)]
struct HeadlessState {
    open: bool,
    times_opened: u64,
    frames: u64,
    last_frame: Option<RenderList>,
    close_requested: bool,
    pointer: PointerInput,
}

/// Surface that records frames instead of presenting them.
#[derive(Debug)]
pub struct HeadlessSurface {
    window: ScreenRect,
    state: Arc<Mutex<HeadlessState>>,
}

/// Observer and remote control for a [`HeadlessSurface`].
#[derive(Debug, Clone)]
pub struct HeadlessHandle {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessSurface {
    /// Create a surface and its handle.
    pub fn new() -> (Self, HeadlessHandle) {
        let state = Arc::new(Mutex::new(HeadlessState::default()));
        let surface = Self {
            window: ScreenRect::default(),
            state: Arc::clone(&state),
        };
        (surface, HeadlessHandle { state })
    }

    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().expect("headless state lock")
    }
}

impl HeadlessHandle {
    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().expect("headless state lock")
    }

    /// Frames drawn since creation.
    pub fn frames(&self) -> u64 {
        self.state().frames
    }

    /// Most recent frame.
    pub fn last_frame(&self) -> Option<RenderList> {
        self.state().last_frame.clone()
    }

    /// Check whether the window is open.
    pub fn is_open(&self) -> bool {
        self.state().open
    }

    /// Number of times the window was opened.
    pub fn times_opened(&self) -> u64 {
        self.state().times_opened
    }

    /// Simulate the user closing the window.
    pub fn request_close(&self) {
        self.state().close_requested = true;
    }

    /// Queue pointer input for the next frame.
    pub fn push_pointer(&self, input: PointerInput) {
        self.state().pointer.accumulate(input);
    }
}

impl TextMeasurer for HeadlessSurface {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        (text.chars().count() as f32 * size * GLYPH_ASPECT, size)
    }
}

impl Renderer for HeadlessSurface {
    fn draw(&mut self, frame: &RenderList) {
        let mut state = self.state();
        state.frames += 1;
        state.last_frame = Some(frame.clone());
    }
}

impl Surface for HeadlessSurface {
    fn open(&mut self, config: &SessionConfig) {
        self.window =
            ScreenRect::from_origin_size(0.0, 0.0, config.window_width, config.window_height);
        let mut state = self.state();
        state.open = true;
        state.times_opened += 1;
    }

    fn close(&mut self) {
        self.state().open = false;
    }

    fn is_open(&self) -> bool {
        self.state().open
    }

    fn poll(&mut self) -> SurfaceEvent {
        let window = self.window;
        let mut state = self.state();
        if std::mem::take(&mut state.close_requested) {
            return SurfaceEvent::CloseRequested;
        }
        SurfaceEvent::Frame(FrameInput {
            window,
            pointer: std::mem::take(&mut state.pointer),
        })
    }
}
