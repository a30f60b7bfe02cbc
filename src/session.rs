//! Producer API.
//!
//! A [`Session`] is a cheap handle shared by any number of producer threads.
//! Every call validates its arguments, records a delta in the update buffer
//! under one mutex and returns without waiting for rendering. Rejected calls
//! are logged and leave the buffer untouched.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::group::GroupId;
use crate::render::Color;
use crate::render_loop::{RenderLoop, Surface};
use crate::series::SeriesId;
use crate::update::UpdateBuffer;
use crate::view::VisualizationMode;

type Launch = Box<dyn FnOnce() + Send>;

struct Shared {
    buffer: Arc<Mutex<UpdateBuffer>>,
    /// Starts the render thread; taken on the first `show`.
    launch: Mutex<Option<Launch>>,
}

/// Handle to one plotting session.
#[derive(Clone)]
pub struct Session {
    shared: Arc<Shared>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session whose render loop the caller drives.
    ///
    /// Use this when the windowing system must run on a thread the caller
    /// owns, as with the gpui backend.
    pub fn detached(config: SessionConfig) -> (Self, RenderLoop) {
        let buffer = Arc::new(Mutex::new(UpdateBuffer::new()));
        let render_loop = RenderLoop::new(Arc::clone(&buffer), config);
        let session = Self {
            shared: Arc::new(Shared {
                buffer,
                launch: Mutex::new(None),
            }),
        };
        (session, render_loop)
    }

    /// Create a session that renders on its own thread.
    ///
    /// The thread starts on the first call that shows the window, builds its
    /// surface with `make_surface` and runs until the process exits.
    pub fn with_surface<S, F>(config: SessionConfig, make_surface: F) -> Self
    where
        S: Surface + 'static,
        F: FnOnce() -> S + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(UpdateBuffer::new()));
        let render_loop = RenderLoop::new(Arc::clone(&buffer), config);
        let launch: Launch = Box::new(move || {
            let spawned = thread::Builder::new()
                .name("streamplot-render".to_string())
                .spawn(move || render_loop.run(make_surface()));
            if let Err(error) = spawned {
                tracing::error!(%error, "Failed to start the render thread");
            }
        });
        Self {
            shared: Arc::new(Shared {
                buffer,
                launch: Mutex::new(Some(launch)),
            }),
        }
    }

    fn buffer(&self) -> MutexGuard<'_, UpdateBuffer> {
        self.shared.buffer.lock().expect("update buffer lock")
    }

    fn update<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut UpdateBuffer) -> Result<T>,
    ) -> Result<T> {
        let result = apply(&mut self.buffer());
        if let Err(error) = &result {
            tracing::error!(operation, %error, "Rejected plot update");
        }
        result
    }

    fn start_render_thread(&self) {
        let launch = self.shared.launch.lock().expect("render launch lock").take();
        if let Some(launch) = launch {
            launch();
        }
    }

    /// Make the window visible, starting the render thread if needed.
    pub fn show(&self) {
        self.buffer().set_window_visible(true);
        self.start_render_thread();
    }

    /// Let the user pan and zoom freely.
    pub fn set_mode_interactive(&self) {
        self.buffer().set_mode(VisualizationMode::Interactive);
    }

    /// Fit the last `points` samples of every visible series.
    pub fn set_mode_tail_count(&self, points: u64) {
        self.buffer()
            .set_mode(VisualizationMode::TailCount { points });
    }

    /// Fit the visible group with an X window of width `span` at its end.
    pub fn set_mode_tail_span(&self, span: f64) {
        self.buffer().set_mode(VisualizationMode::TailSpan { span });
    }

    /// Fit every series of the visible group.
    pub fn set_mode_full_extent(&self) {
        self.buffer().set_mode(VisualizationMode::FullGroupExtent);
    }

    /// Fit one series.
    pub fn set_mode_single_series(&self, series: u32) -> Result<()> {
        self.update("set_mode_single_series", |buffer| {
            let series = SeriesId::new(series)?;
            buffer.set_mode(VisualizationMode::SingleSeries { series });
            Ok(())
        })
    }

    /// Label ticks with all significant digits of an `f64`.
    pub fn enable_full_precision_display(&self) {
        self.buffer().set_full_precision(true);
    }

    /// Clear every series and every group.
    pub fn clear_all(&self) {
        self.buffer().clear_all();
    }

    /// Replace a series with Y values.
    pub fn replace_numbers(&self, series: u32, ys: &[f64]) -> Result<()> {
        self.update("replace_numbers", |buffer| {
            buffer.replace_numbers(SeriesId::new(series)?, ys)
        })
    }

    /// Replace a series with (x, y) pairs.
    pub fn replace_points(&self, series: u32, xs: &[f64], ys: &[f64]) -> Result<()> {
        self.update("replace_points", |buffer| {
            buffer.replace_points(SeriesId::new(series)?, xs, ys)
        })
    }

    /// Replace a series with `[x0, y0, x1, y1, ..]`.
    pub fn replace_interleaved(&self, series: u32, xy: &[f64]) -> Result<()> {
        self.update("replace_interleaved", |buffer| {
            buffer.replace_interleaved(SeriesId::new(series)?, xy)
        })
    }

    /// Append one Y value.
    pub fn append_number(&self, series: u32, y: f64) -> Result<()> {
        self.update("append_number", |buffer| {
            buffer.append_numbers(SeriesId::new(series)?, &[y])
        })
    }

    /// Append Y values.
    pub fn append_numbers(&self, series: u32, ys: &[f64]) -> Result<()> {
        self.update("append_numbers", |buffer| {
            buffer.append_numbers(SeriesId::new(series)?, ys)
        })
    }

    /// Append one (x, y) pair.
    pub fn append_point(&self, series: u32, x: f64, y: f64) -> Result<()> {
        self.update("append_point", |buffer| {
            buffer.append_points(SeriesId::new(series)?, &[x], &[y])
        })
    }

    /// Append (x, y) pairs.
    pub fn append_points(&self, series: u32, xs: &[f64], ys: &[f64]) -> Result<()> {
        self.update("append_points", |buffer| {
            buffer.append_points(SeriesId::new(series)?, xs, ys)
        })
    }

    /// Append `[x0, y0, x1, y1, ..]`.
    pub fn append_interleaved(&self, series: u32, xy: &[f64]) -> Result<()> {
        self.update("append_interleaved", |buffer| {
            buffer.append_interleaved(SeriesId::new(series)?, xy)
        })
    }

    /// Set a series' line color.
    pub fn set_color(&self, series: u32, color: Color) -> Result<()> {
        self.update("set_color", |buffer| {
            buffer.set_series_color(SeriesId::new(series)?, color);
            Ok(())
        })
    }

    /// Set a series' display name.
    pub fn set_name(&self, series: u32, name: &str) -> Result<()> {
        self.update("set_name", |buffer| {
            buffer.set_series_name(SeriesId::new(series)?, name);
            Ok(())
        })
    }

    /// Drop all samples of a series.
    pub fn clear(&self, series: u32) -> Result<()> {
        self.update("clear", |buffer| {
            buffer.clear_series(SeriesId::new(series)?);
            Ok(())
        })
    }

    /// Show a series in the default group, starting the render thread if
    /// needed.
    pub fn show_series(&self, series: u32) -> Result<()> {
        self.update("show_series", |buffer| {
            buffer.show_series(SeriesId::new(series)?);
            Ok(())
        })?;
        self.start_render_thread();
        Ok(())
    }

    /// Remove a series from the default group.
    pub fn hide_series(&self, series: u32) -> Result<()> {
        self.update("hide_series", |buffer| {
            buffer.hide_series(SeriesId::new(series)?);
            Ok(())
        })
    }

    /// Empty the default group.
    pub fn hide_all_series(&self) {
        self.buffer().hide_all_series();
    }

    /// Add a series to a group.
    pub fn add_to_group(&self, group: u32, series: u32) -> Result<()> {
        self.update("add_to_group", |buffer| {
            buffer.add_member(GroupId::new(group)?, SeriesId::new(series)?);
            Ok(())
        })
    }

    /// Remove a series from a group.
    pub fn remove_from_group(&self, group: u32, series: u32) -> Result<()> {
        self.update("remove_from_group", |buffer| {
            buffer.remove_member(GroupId::new(group)?, SeriesId::new(series)?);
            Ok(())
        })
    }

    /// Remove every series from a group.
    pub fn clear_group(&self, group: u32) -> Result<()> {
        self.update("clear_group", |buffer| {
            buffer.clear_group(GroupId::new(group)?);
            Ok(())
        })
    }

    /// Set a group's display name.
    pub fn set_group_name(&self, group: u32, name: &str) -> Result<()> {
        self.update("set_group_name", |buffer| {
            buffer.set_group_name(GroupId::new(group)?, name);
            Ok(())
        })
    }

    /// Draw a group, starting the render thread if needed.
    pub fn show_group(&self, group: u32) -> Result<()> {
        self.update("show_group", |buffer| {
            buffer.show_group(GroupId::new(group)?);
            Ok(())
        })?;
        self.start_render_thread();
        Ok(())
    }
}
