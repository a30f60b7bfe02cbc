//! Per-frame viewport derivation and range repair.

use crate::interaction::{PointerInput, ZoomSettings, interactive_update};
use crate::series::Series;
use crate::store::Store;
use crate::view::{MAX_PLOT_RANGE, MIN_PLOT_RANGE, Range, Viewport, VisualizationMode};

/// Minimum number of representable `f64` steps across a viewport axis.
const PRECISION_SAFETY_FACTOR: f64 = 100.0;

/// Derive this frame's viewport from the store's mode and normalize it.
///
/// Interactive mode transforms the previous frame's viewport by pointer
/// input; every other mode fits data of the visible group.
pub fn derive_viewport(store: &Store, input: &PointerInput, zoom: ZoomSettings) -> Viewport {
    let raw = match store.mode() {
        VisualizationMode::Interactive => {
            interactive_update(store.viewport(), store.plot_screen(), input, zoom)
        }
        VisualizationMode::FullGroupExtent => group_bounds(store, Series::bounds),
        VisualizationMode::TailSpan { span } => {
            let mut bounds = group_bounds(store, Series::bounds);
            if !bounds.x.is_empty() {
                bounds.x.min = bounds.x.max - span;
            }
            bounds
        }
        VisualizationMode::TailCount { points } => {
            group_bounds(store, |series| series.bounds_from(series.tail_start(points)))
        }
        VisualizationMode::SingleSeries { series } => store.series(series).bounds(),
    };
    normalize(raw)
}

/// Union of a per-series bounding box over the visible group.
fn group_bounds(store: &Store, bounds: impl Fn(&Series) -> Viewport) -> Viewport {
    store
        .visible_members()
        .iter()
        .map(|id| bounds(store.series(*id)))
        .fold(Viewport::EMPTY, Viewport::union)
}

/// Clamp, repair and widen a raw viewport until it can be drawn.
pub fn normalize(viewport: Viewport) -> Viewport {
    let mut clamped = false;
    let x = clamp_range(viewport.x, &mut clamped);
    let y = clamp_range(viewport.y, &mut clamped);
    if clamped {
        tracing::warn!(
            min = MIN_PLOT_RANGE,
            max = MAX_PLOT_RANGE,
            "Plot-space coordinates were clamped into the supported range"
        );
    }
    Viewport::new(
        ensure_resolvable(repair_range(x)),
        ensure_resolvable(repair_range(y)),
    )
}

fn clamp_range(range: Range, clamped: &mut bool) -> Range {
    if range.is_empty() {
        return range;
    }
    Range::new(clamp_bound(range.min, clamped), clamp_bound(range.max, clamped))
}

/// Clamp a bound's magnitude into `[MIN_PLOT_RANGE, MAX_PLOT_RANGE]`,
/// keeping its sign. Zero stays zero.
fn clamp_bound(value: f64, clamped: &mut bool) -> f64 {
    let magnitude = value.abs();
    let limited = if magnitude > MAX_PLOT_RANGE {
        MAX_PLOT_RANGE
    } else if magnitude > 0.0 && magnitude < MIN_PLOT_RANGE {
        MIN_PLOT_RANGE
    } else {
        return value;
    };
    *clamped = true;
    limited.copysign(value)
}

/// Pad a zero-width range by 0.5 on each side and reset an inverted or
/// undefined range to [`Range::DEFAULT`].
pub fn repair_range(range: Range) -> Range {
    if range.min == range.max {
        Range::new(range.min - 0.5, range.max + 0.5)
    } else if range.min < range.max {
        range
    } else {
        Range::DEFAULT
    }
}

/// Widen a range symmetrically until it spans at least
/// `PRECISION_SAFETY_FACTOR` representable steps at its start.
pub fn ensure_resolvable(range: Range) -> Range {
    let step = range.min.next_up() - range.min;
    let correction = range.span() - step * PRECISION_SAFETY_FACTOR;
    if correction < 0.0 {
        let half = correction.abs() / 2.0;
        Range::new(range.min - half, range.max + half)
    } else {
        range
    }
}
