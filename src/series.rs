//! Committed series slots.

use std::fmt;

use crate::error::{PlotError, Result};
use crate::geom::Point;
use crate::render::Color;
use crate::view::{Range, Viewport};

/// Number of series slots.
pub const MAX_SERIES: usize = 1024;

/// Validated series slot identity in `[0, MAX_SERIES)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(u32);

impl SeriesId {
    /// Validate a raw series index.
    pub fn new(index: u32) -> Result<Self> {
        if (index as usize) < MAX_SERIES {
            Ok(Self(index))
        } else {
            Err(PlotError::InvalidSeries {
                index,
                max: MAX_SERIES as u32 - 1,
            })
        }
    }

    /// Raw slot index.
    pub fn get(self) -> u32 {
        self.0
    }

    pub(crate) fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Representation of a series' samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Y values only; X is the sample index.
    Numbers,
    /// Explicit (x, y) pairs.
    Points,
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbers => f.write_str("numbers"),
            Self::Points => f.write_str("points"),
        }
    }
}

/// One committed series: samples, identity and cached bounds.
///
/// `xs` is either empty (index mode) or exactly as long as `ys`.
#[derive(Debug, Clone)]
pub struct Series {
    pub(crate) xs: Vec<f64>,
    pub(crate) ys: Vec<f64>,
    pub(crate) color: Color,
    pub(crate) label: String,
    pub(crate) bounds: Viewport,
    pub(crate) initialized: bool,
}

impl Default for Series {
    fn default() -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
            color: Color::WHITE,
            label: String::new(),
            bounds: Viewport::EMPTY,
            initialized: false,
        }
    }
}

impl Series {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.ys.len()
    }

    /// Check if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    /// Check whether the series carries explicit X values.
    pub fn has_x(&self) -> bool {
        !self.xs.is_empty() && self.xs.len() == self.ys.len()
    }

    /// Explicit X values; empty in index mode.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y values.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Sample at `index`, with the implied X in index mode.
    pub fn point(&self, index: usize) -> Option<Point> {
        let y = *self.ys.get(index)?;
        let x = if self.has_x() {
            self.xs[index]
        } else {
            index as f64
        };
        Some(Point::new(x, y))
    }

    /// Iterate over samples from `begin` onwards.
    pub fn points_from(&self, begin: usize) -> impl Iterator<Item = Point> + '_ {
        (begin.min(self.len())..self.len()).filter_map(|index| self.point(index))
    }

    /// Display label, `"[i]"` or `"[i] name"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Line color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Cached bounding box over all samples.
    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    /// Check whether the slot has ever been merged.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Bounding box of the samples from `begin` onwards.
    ///
    /// Scans only `len - begin` samples.
    pub fn bounds_from(&self, begin: usize) -> Viewport {
        if begin >= self.len() {
            return Viewport::EMPTY;
        }
        if self.has_x() {
            let mut bounds = Viewport::EMPTY;
            for point in self.points_from(begin) {
                bounds.include(point);
            }
            return bounds;
        }
        let mut y = Range::EMPTY;
        for value in &self.ys[begin..] {
            y.include(*value);
        }
        Viewport::new(Range::new(begin as f64, (self.len() - 1) as f64), y)
    }

    /// Index of the first of the last `count` samples.
    pub fn tail_start(&self, count: u64) -> usize {
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        self.len().saturating_sub(count)
    }
}
