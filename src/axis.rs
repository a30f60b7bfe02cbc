//! Tick placement and label formatting.
//!
//! Spacing is rounded up to the conventional sequence {1, 2, 2.5, 5, 10}·10^k
//! so labels stay readable at any zoom level.

use crate::view::Range;

/// Upper bound on ticks per axis.
pub const MAX_TICKS: usize = 32;

/// Significant digits of a tick label.
pub const LABEL_PRECISION: usize = 14;

/// Significant digits of a tick label with full-precision display enabled.
pub const FULL_LABEL_PRECISION: usize = 17;

const NICE_FRACTIONS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// A tick within this fraction of one spacing unit from zero is drawn at zero.
const ZERO_SNAP_FRACTION: f64 = 1e-3;

/// A run of this many trailing zeros is collapsed into an exponent suffix.
const TRAILING_ZEROS_THRESHOLD: usize = 3;

/// Measures rendered text.
pub trait TextMeasurer {
    /// Width and height of `text` at font `size`, in pixels.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// A single tick mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position in plot space.
    pub value: f64,
    /// Formatted label.
    pub label: String,
}

/// Tick layout for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    /// Tick budget derived from the pixel extent.
    pub count: usize,
    /// Distance between neighbouring ticks.
    pub spacing: f64,
    /// First multiple of `spacing` at or above the range start.
    pub first: f64,
    /// Pixels per tick this layout was generated with.
    pub pixels_per_tick: f32,
    /// Ticks inside the range, ascending.
    pub ticks: Vec<Tick>,
}

impl AxisTicks {
    /// Width of the widest label.
    pub fn max_label_width(&self, measurer: &dyn TextMeasurer, font_size: f32) -> f32 {
        self.ticks
            .iter()
            .map(|tick| measurer.measure(&tick.label, font_size).0)
            .fold(0.0, f32::max)
    }
}

/// Number of ticks that fit into `extent` pixels, in `1..=MAX_TICKS`.
pub fn tick_count(extent: f32, pixels_per_tick: f32) -> usize {
    let count = (extent / pixels_per_tick).floor();
    if count.is_nan() || count < 1.0 {
        return 1;
    }
    (count as usize).min(MAX_TICKS)
}

/// Smallest nice spacing that places at most `count` ticks across `range`.
pub fn tick_spacing(range: Range, count: usize) -> f64 {
    let raw_step = range.span() / count.max(1) as f64;
    if !(raw_step.is_finite() && raw_step > 0.0) {
        return 1.0;
    }
    let base = 10_f64.powf(raw_step.log10().floor());
    let fraction = raw_step / base;
    let nice = NICE_FRACTIONS
        .iter()
        .copied()
        .find(|nice| fraction <= *nice)
        .unwrap_or(10.0);
    nice * base
}

/// Generate ticks for one axis.
pub fn generate_ticks(extent: f32, pixels_per_tick: f32, range: Range, precision: usize) -> AxisTicks {
    let count = tick_count(extent, pixels_per_tick);
    let spacing = tick_spacing(range, count);
    let first = (range.min / spacing).ceil() * spacing;

    let mut ticks = Vec::new();
    let mut value = first;
    while value < range.max && ticks.len() < MAX_TICKS {
        if value.abs() < spacing * ZERO_SNAP_FRACTION {
            value = 0.0;
        }
        ticks.push(Tick {
            value,
            label: format_tick_label(value, precision),
        });
        value += spacing;
    }

    AxisTicks {
        count,
        spacing,
        first,
        pixels_per_tick,
        ticks,
    }
}

/// Generate x ticks, halving the density until the widest label fits its
/// pixel budget or the budget reaches `max_pixels_per_tick`.
pub fn layout_x_ticks(
    extent: f32,
    pixels_per_tick: f32,
    max_pixels_per_tick: f32,
    range: Range,
    precision: usize,
    measurer: &dyn TextMeasurer,
    font_size: f32,
) -> AxisTicks {
    let pixels_per_tick = pixels_per_tick.max(1.0);
    let ticks = generate_ticks(extent, pixels_per_tick, range, precision);
    if ticks.max_label_width(measurer, font_size) > pixels_per_tick
        && pixels_per_tick < max_pixels_per_tick
    {
        return layout_x_ticks(
            extent,
            pixels_per_tick * 2.0,
            max_pixels_per_tick,
            range,
            precision,
            measurer,
            font_size,
        );
    }
    ticks
}

/// Format a tick value with `precision` significant digits, collapsing long
/// runs of trailing zeros (`1000000` becomes `1+e6`).
pub fn format_tick_label(value: f64, precision: usize) -> String {
    collapse_trailing_zeros(format_general(value, precision))
}

/// Shortest of fixed or scientific notation with `precision` significant
/// digits and trailing zeros removed, like C's `%g`.
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            strip_fraction_zeros(mantissa),
            exponent.unsigned_abs()
        );
    }

    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    strip_fraction_zeros(&format!("{value:.decimals$}")).to_string()
}

fn strip_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn collapse_trailing_zeros(label: String) -> String {
    let trimmed = label.trim_end_matches('0');
    let zeros = label.len() - trimmed.len();
    if zeros >= TRAILING_ZEROS_THRESHOLD && !trimmed.is_empty() {
        format!("{trimmed}+e{zeros}")
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Fixed-width font: every glyph is half the font size wide.
    struct FixedWidth;

    impl TextMeasurer for FixedWidth {
        fn measure(&self, text: &str, size: f32) -> (f32, f32) {
            (text.chars().count() as f32 * size * 0.5, size)
        }
    }

    fn is_nice(spacing: f64) -> bool {
        let base = 10_f64.powf(spacing.log10().floor());
        let fraction = spacing / base;
        NICE_FRACTIONS
            .iter()
            .any(|nice| (fraction - nice).abs() < 1e-9 * nice)
    }

    #[test]
    fn count_is_capped() {
        assert_eq!(tick_count(500.0, 50.0), 10);
        assert_eq!(tick_count(10_000.0, 50.0), MAX_TICKS);
        assert_eq!(tick_count(20.0, 50.0), 1);
    }

    #[test]
    fn spacing_rounds_up_to_nice_value() {
        assert_eq!(tick_spacing(Range::new(0.0, 10.0), 10), 1.0);
        assert_eq!(tick_spacing(Range::new(0.0, 11.0), 10), 2.0);
        assert_eq!(tick_spacing(Range::new(0.0, 22.0), 10), 2.5);
        assert_eq!(tick_spacing(Range::new(0.0, 30.0), 10), 5.0);
        assert_eq!(tick_spacing(Range::new(0.0, 0.07), 10), 0.01);
    }

    #[test]
    fn ticks_start_on_multiple_of_spacing() {
        let ticks = generate_ticks(500.0, 50.0, Range::new(-0.55, 4.3), LABEL_PRECISION);
        assert_eq!(ticks.spacing, 0.5);
        assert_eq!(ticks.first, -0.5);
        let labels: Vec<_> = ticks.ticks.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(
            labels,
            ["-0.5", "0", "0.5", "1", "1.5", "2", "2.5", "3", "3.5", "4"]
        );
    }

    #[test]
    fn near_zero_tick_snaps_to_zero() {
        let ticks = generate_ticks(500.0, 50.0, Range::new(-0.3, 0.35), LABEL_PRECISION);
        let zero = ticks
            .ticks
            .iter()
            .find(|tick| tick.value.abs() < ticks.spacing * 0.5)
            .expect("zero tick");
        assert_eq!(zero.value, 0.0);
        assert_eq!(zero.label, "0");
    }

    #[test]
    fn general_format_matches_printf() {
        assert_eq!(format_general(0.5, 14), "0.5");
        assert_eq!(format_general(-2.25, 14), "-2.25");
        assert_eq!(format_general(0.1 + 0.2, 14), "0.3");
        assert_eq!(format_general(123_456.0, 14), "123456");
        assert_eq!(format_general(1e20, 14), "1e+20");
        assert_eq!(format_general(2.5e-7, 14), "2.5e-07");
        assert_eq!(format_general(0.0001, 14), "0.0001");
        assert_eq!(format_general(0.1 + 0.2, 17), "0.30000000000000004");
    }

    #[test]
    fn long_zero_runs_collapse() {
        assert_eq!(format_tick_label(1_000_000.0, 14), "1+e6");
        assert_eq!(format_tick_label(-25_000.0, 14), "-25+e3");
        assert_eq!(format_tick_label(1000.0, 14), "1+e3");
        assert_eq!(format_tick_label(100.0, 14), "100");
        assert_eq!(format_tick_label(10.0, 14), "10");
        assert_eq!(format_tick_label(1e100, 14), "1e+100");
        assert_eq!(format_tick_label(0.0, 14), "0");
    }

    #[test]
    fn wide_labels_double_the_budget() {
        let range = Range::new(1_234_567.125, 1_234_567.5);
        let ticks = layout_x_ticks(600.0, 50.0, 1000.0, range, LABEL_PRECISION, &FixedWidth, 22.0);
        assert!(ticks.pixels_per_tick > 50.0);
        assert!(
            ticks.max_label_width(&FixedWidth, 22.0) <= ticks.pixels_per_tick
                || ticks.pixels_per_tick >= 1000.0
        );
    }

    #[test]
    fn narrow_labels_keep_the_budget() {
        let ticks = layout_x_ticks(
            500.0,
            50.0,
            1000.0,
            Range::new(0.0, 10.0),
            LABEL_PRECISION,
            &FixedWidth,
            8.0,
        );
        assert_eq!(ticks.pixels_per_tick, 50.0);
        assert_eq!(ticks.count, 10);
    }

    proptest! {
        #[test]
        fn spacing_is_nice_and_covers_span(
            min in -1e6_f64..1e6,
            span in 1e-6_f64..1e6,
            extent in 1.0_f32..4000.0,
            pixels in 10.0_f32..200.0,
        ) {
            let range = Range::new(min, min + span);
            let count = tick_count(extent, pixels);
            let spacing = tick_spacing(range, count);
            prop_assert!(is_nice(spacing), "spacing {spacing} is not nice");
            prop_assert!(spacing * count as f64 >= range.span() * (1.0 - 1e-12));
        }

        #[test]
        fn ticks_stay_inside_range(
            min in -1e3_f64..1e3,
            span in 1e-3_f64..1e3,
        ) {
            let range = Range::new(min, min + span);
            let ticks = generate_ticks(800.0, 50.0, range, LABEL_PRECISION);
            prop_assert!(ticks.ticks.len() <= MAX_TICKS);
            for tick in &ticks.ticks {
                prop_assert!(tick.value < range.max);
                prop_assert!(tick.value >= range.min - ticks.spacing * 1e-3);
            }
        }
    }
}
