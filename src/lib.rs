//! streamplot is an embeddable real-time plotting library.
//!
//! Any number of producer threads push samples through a cloneable
//! [`Session`]. Updates collect in a single mutex-guarded buffer; one render
//! loop merges them into its own store each frame, fits the viewport and
//! hands a backend-agnostic [`RenderList`] to a [`Renderer`].

#![forbid(unsafe_code)]

pub mod axis;
pub mod config;
pub mod error;
pub(crate) mod frame;
pub mod geom;
pub mod group;
pub mod headless;
pub mod interaction;
pub mod render;
pub mod render_loop;
pub mod series;
pub mod session;
pub mod store;
pub mod style;
pub mod sync;
pub mod transform;
pub mod update;
pub mod view;
pub mod viewport;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{AxisTicks, TextMeasurer, Tick};
pub use config::SessionConfig;
pub use error::{LengthError, PlotError, Result};
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use group::{GroupId, MAX_GROUPS};
pub use headless::{HeadlessHandle, HeadlessSurface};
pub use interaction::PointerInput;
pub use render::{
    Color, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, Renderer, TextStyle,
};
pub use render_loop::{FrameInput, RenderLoop, StepOutcome, Surface, SurfaceEvent};
pub use series::{MAX_SERIES, SampleKind, SeriesId};
pub use session::Session;
pub use store::Store;
pub use style::{PALETTE, Theme};
pub use transform::Transform;
pub use view::{Range, Viewport, VisualizationMode};

#[cfg(feature = "gpui")]
pub use gpui_backend::StreamPlotView;
