//! Plot-space ranges, bounding boxes and visualization modes.

use crate::geom::Point;
use crate::series::SeriesId;

/// Largest plot-space magnitude a viewport bound may take.
pub const MAX_PLOT_RANGE: f64 = 1e300;
/// Smallest non-zero plot-space magnitude a viewport bound may take.
pub const MIN_PLOT_RANGE: f64 = 1e-300;

/// Closed plot-space interval.
///
/// `min > max` marks an empty range; [`Range::EMPTY`] uses infinite
/// sentinels so that folding any finite value in with [`Range::include`]
/// replaces both bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Range {
    /// Empty range, the identity of [`Range::union`].
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Range used when a viewport axis cannot be derived from data.
    pub const DEFAULT: Self = Self {
        min: -0.5,
        max: 0.5,
    };

    /// Create a range from its bounds. The bounds are kept as given.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether the range contains no values.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Expand the range to include a value.
    pub fn include(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Smallest range covering both inputs.
    pub fn union(a: Self, b: Self) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }
}

/// Axis-aligned plot-space rectangle: a series bounding box or the visible
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X axis range.
    pub x: Range,
    /// Y axis range.
    pub y: Range,
}

impl Viewport {
    /// Bounding box of nothing.
    pub const EMPTY: Self = Self {
        x: Range::EMPTY,
        y: Range::EMPTY,
    };

    /// Create a viewport from X and Y ranges.
    pub const fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Expand the box to include a point.
    pub fn include(&mut self, point: Point) {
        self.x.include(point.x);
        self.y.include(point.y);
    }

    /// Smallest box covering both inputs.
    pub fn union(a: Self, b: Self) -> Self {
        Self {
            x: Range::union(a.x, b.x),
            y: Range::union(a.y, b.y),
        }
    }

    /// Check whether either axis is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Range::DEFAULT, Range::DEFAULT)
    }
}

/// How the visible viewport is chosen each frame.
///
/// Exactly one mode is active; selecting a mode replaces the whole
/// descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VisualizationMode {
    /// The user pans and zooms; the range only changes through pointer input.
    Interactive,
    /// Fit the last `points` samples of every series in the visible group.
    TailCount {
        /// Number of trailing samples per series.
        points: u64,
    },
    /// Fit the visible group, keeping only the trailing `span` on X.
    TailSpan {
        /// Width of the X window ending at the largest X value.
        span: f64,
    },
    /// Fit every series in the visible group (default).
    #[default]
    FullGroupExtent,
    /// Fit one series regardless of group membership.
    SingleSeries {
        /// Series to fit.
        series: SeriesId,
    },
}
