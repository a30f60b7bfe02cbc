//! GPUI integration for streamplot.
//!
//! [`StreamPlotView`] drives a detached [`RenderLoop`](crate::RenderLoop)
//! from GPUI's main thread: every repaint synchronizes pending updates,
//! builds the frame during prepaint and paints its render list.

mod paint;
mod text;
mod view;

pub use view::StreamPlotView;
