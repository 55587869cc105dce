//! FIR filter design for the polyphase interpolators.
//!
//! Windowed-sinc and least squares lowpass design plus the usual transforms that turn a lowpass into a highpass,
//! bandpass or Hilbert transformer. All cutoffs and frequencies are relative to the Nyquist
//! frequency, so `1.0` is half the sample rate.
//!
//! # Example
//!
//! ```rust
//! use multirate::filter::{design_resampling_filter, Window};
//! use multirate::interpolation::{resample, SampleRates};
//! use multirate::polyphase::PolyphaseFilter;
//! use multirate::{nz, Rational};
//!
//! let ratio = SampleRates::new(nz!(44_100), nz!(48_000)).ratio();
//! let taps = design_resampling_filter(ratio, 32, 32 * 16 + 1, Window::Kaiser(8.0))?;
//! let filter = PolyphaseFilter::new(&taps, 32)?;
//!
//! let input = vec![0.0; 441];
//! let (output, _) = resample(&input, &filter.view(), ratio, Rational::from_integer(0), 480)?;
//! assert_eq!(output.len(), 480);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use num_traits::{Float as FloatOps, FloatConst, NumCast};

use crate::common::assert_error_traits;
use crate::interpolation::resampling_filter_cutoff;
use crate::rational::Rational;
use crate::signal::TimeSignal;
use crate::{Float, Sample};

mod least_squares;
mod lowpass;
mod transforms;
pub mod windows;

pub use least_squares::fir_least_squares;
pub use lowpass::{fir_lowpass, fir_lowpass_win, fir_lowpass_with_window};
pub use transforms::{
    complementary_response, halfband_to_hilbert_even, halfband_to_hilbert_odd, mirror_response,
    shift_response,
};
pub use windows::Window;

/// Floating point sample type the design functions work with.
///
/// Implemented for `f32` and `f64`.
pub trait Coefficient: Sample + FloatOps + FloatConst {}

impl<T: Sample + FloatOps + FloatConst> Coefficient for T {}

/// Converts a design constant to the coefficient type.
#[inline]
pub(crate) fn cast<T: Coefficient>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

/// Error that can occur when designing or transforming a filter.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    /// The filter has no taps.
    #[error("A filter needs at least one tap")]
    EmptyFilter,
    /// The output and the input do not have matching lengths.
    #[error("Output holds {actual} taps but {expected} are needed")]
    LengthMismatch {
        /// Length the operation needs.
        expected: usize,
        /// Length of the buffer that was passed in.
        actual: usize,
    },
    /// The operation only works on filters with a centre tap.
    #[error("Filter length must be odd, got {0}")]
    EvenLength(usize),
    /// Zero phases were requested.
    #[error("A resampling filter needs at least one phase")]
    NoPhases,
    /// The ratio of input to output samples was zero or negative.
    #[error("Sample rate ratio must be positive, got {0}")]
    NonPositiveRatio(Rational<i64>),
    /// The taps sum to zero, so the filter cannot be normalized to unity gain.
    #[error("Filter taps sum to zero")]
    ZeroGain,
    /// The least squares solver failed.
    #[error("Least squares design failed: {0}")]
    LeastSquares(&'static str),
}
assert_error_traits!(FilterError);

/// Designs the prototype lowpass for resampling by `sample_rates` (input samples per output
/// sample) with a bank of `num_phases` phases.
///
/// The cutoff comes from [`resampling_filter_cutoff`] and the taps are scaled by `num_phases` to
/// make up for the energy lost to zero stuffing, so the resampled signal keeps its level.
/// Pass the result to [`PolyphaseFilter::new`](crate::polyphase::PolyphaseFilter::new) with the
/// same phase count.
pub fn design_resampling_filter(
    sample_rates: Rational<i64>,
    num_phases: usize,
    num_taps: usize,
    window: Window,
) -> Result<TimeSignal<Float>, FilterError> {
    if num_phases == 0 {
        return Err(FilterError::NoPhases);
    }
    if sample_rates <= 0 {
        return Err(FilterError::NonPositiveRatio(sample_rates));
    }
    let cutoff = resampling_filter_cutoff(sample_rates, num_phases);
    let mut taps = fir_lowpass::<Float>(cast(cutoff), num_taps, window)?;
    taps *= num_phases as Float;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        %sample_rates,
        num_phases,
        num_taps,
        cutoff,
        "designed resampling filter"
    );
    Ok(taps)
}
