//! Errors reported by producer-side operations.

use thiserror::Error;

use crate::series::SampleKind;

/// Result type alias using [`PlotError`].
pub type Result<T> = std::result::Result<T, PlotError>;

/// A rejected producer call. The pending update is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PlotError {
    /// Series index outside the fixed slot range.
    #[error("the series index '{index}' is not within the valid fixed range of [0, {max}]")]
    InvalidSeries {
        /// Rejected index.
        index: u32,
        /// Largest valid index.
        max: u32,
    },

    /// Group index outside the fixed slot range.
    #[error("the group index '{index}' is not within the valid fixed range of [0, {max}]")]
    InvalidGroup {
        /// Rejected index.
        index: u32,
        /// Largest valid index.
        max: u32,
    },

    /// The series already holds samples of the other kind.
    #[error("series {series} contains {pending} and cannot be extended with the other sample kind")]
    ArityConflict {
        /// Series index.
        series: u32,
        /// Kind the series resolved to.
        pending: SampleKind,
    },

    /// Sample arrays have unusable lengths.
    #[error(transparent)]
    MalformedLength(#[from] LengthError),
}

/// Length violations of sample array inputs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthError {
    /// Interleaved `[x0, y0, x1, y1, ..]` input with an odd element count.
    #[error("interleaved point array has odd length {len}; expected (x, y) pairs")]
    OddInterleaved {
        /// Number of elements supplied.
        len: usize,
    },
    /// Separate X and Y arrays of different lengths.
    #[error("x has {x_len} elements but y has {y_len} elements")]
    Mismatch {
        /// Length of the X array.
        x_len: usize,
        /// Length of the Y array.
        y_len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_diagnostics() {
        let err = PlotError::InvalidSeries {
            index: 99_999,
            max: 1023,
        };
        assert_eq!(
            err.to_string(),
            "the series index '99999' is not within the valid fixed range of [0, 1023]"
        );

        let err = PlotError::from(LengthError::OddInterleaved { len: 3 });
        assert!(err.to_string().contains("odd length 3"));

        let err = PlotError::ArityConflict {
            series: 4,
            pending: SampleKind::Points,
        };
        assert!(err.to_string().contains("contains points"));
    }
}
