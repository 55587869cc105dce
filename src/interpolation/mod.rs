//! Changing the sample rate of a signal.
//!
//! From simplest to most capable:
//!
//! - [`decimate`] and [`expand`] drop or insert samples by an integer factor. They do not filter;
//!   filter before decimating and after expanding.
//! - [`interpolate`] upsamples by the phase count of a [`PolyphaseView`], filtering as it goes.
//!   Any window of the (conceptually infinite) interpolated signal can be requested by its
//!   absolute offset, so long outputs can be computed block by block.
//! - [`resample()`] converts between arbitrary rational rates and hands back the
//!   [`ContinuationParams`] needed to process the next chunk of a stream without phase drift.
//!   [`Resampler`] threads those parameters through a stream for you.
//!
//! # Example
//!
//! ```rust
//! use multirate::interpolation::interpolate;
//! use multirate::polyphase::PolyphaseFilter;
//!
//! let filter = PolyphaseFilter::new(&[1.0f32, 2.0, 3.0], 2)?;
//! let input = [1.0f32, 0.0, 1.0];
//! let output = interpolate(&input, &filter.view(), 0, 8)?;
//! assert_eq!(output.as_slice(), &[1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0, 0.0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::common::assert_error_traits;
use crate::convolution::{convolution_length, ConvolutionMode};
use crate::kernels::dot_product;
use crate::polyphase::PolyphaseView;
use crate::signal::{Domain, Signal};
use crate::Sample;

mod resample;
mod resampler;

pub use resample::{
    change_sample_rate, continuation, resample, resample_into, resampling_delay,
    resampling_filter_cutoff, resampling_length, ContinuationParams, ResampleError, SampleRates,
};
#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
pub use resample::resample_par_into;
pub use resampler::Resampler;

/// Error that can occur when changing the rate by an integer factor.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum RateChangeError {
    /// The factor was zero.
    #[error("Rate change factor must be at least 1")]
    ZeroRate,
    /// The output buffer does not have the length the rate change produces.
    #[error("Output holds {actual} samples but the rate change produces {expected}")]
    OutputSize {
        /// Length the rate change produces.
        expected: usize,
        /// Length of the buffer that was passed in.
        actual: usize,
    },
}
assert_error_traits!(RateChangeError);

/// Error that can occur when interpolating.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum InterpolateError {
    /// The requested window extends past the end of the interpolated signal.
    #[error("Requested samples up to {end} but the interpolated signal only has {max_len}")]
    OutputTooLong {
        /// One past the last requested high-rate index.
        end: usize,
        /// Length of the full convolution of the expanded input with the filter.
        max_len: usize,
    },
}
assert_error_traits!(InterpolateError);

/// Number of samples [`decimate`] produces for `input_len` samples.
#[inline]
pub const fn decimated_len(input_len: usize, rate: usize) -> usize {
    input_len.div_ceil(rate)
}

/// Keeps every `rate`th sample of `input`, starting with the first.
///
/// `output` must hold `ceil(input.len() / rate)` samples.
pub fn decimate_into<T: Copy>(
    output: &mut [T],
    input: &[T],
    rate: usize,
) -> Result<(), RateChangeError> {
    if rate == 0 {
        return Err(RateChangeError::ZeroRate);
    }
    let expected = decimated_len(input.len(), rate);
    if output.len() != expected {
        return Err(RateChangeError::OutputSize {
            expected,
            actual: output.len(),
        });
    }
    for (o, &i) in output.iter_mut().zip(input.iter().step_by(rate)) {
        *o = i;
    }
    Ok(())
}

/// Allocating form of [`decimate_into`].
pub fn decimate<T: Sample, D: Domain>(
    input: &Signal<T, D>,
    rate: usize,
) -> Result<Signal<T, D>, RateChangeError> {
    if rate == 0 {
        return Err(RateChangeError::ZeroRate);
    }
    let mut output = Signal::zeros(decimated_len(input.len(), rate));
    decimate_into(&mut output, input, rate)?;
    Ok(output)
}

/// Inserts `rate - 1` zeros after every sample of `input`.
///
/// `output` must hold `input.len() * rate` samples. Follow with a lowpass filter to interpolate,
/// or use [`interpolate`] which does both at once.
pub fn expand_into<T: Sample>(
    output: &mut [T],
    input: &[T],
    rate: usize,
) -> Result<(), RateChangeError> {
    if rate == 0 {
        return Err(RateChangeError::ZeroRate);
    }
    let expected = input.len() * rate;
    if output.len() != expected {
        return Err(RateChangeError::OutputSize {
            expected,
            actual: output.len(),
        });
    }
    for (chunk, &i) in output.chunks_exact_mut(rate).zip(input) {
        chunk[0] = i;
        chunk[1..].fill(T::zero_value());
    }
    Ok(())
}

/// Allocating form of [`expand_into`].
pub fn expand<T: Sample, D: Domain>(
    input: &Signal<T, D>,
    rate: usize,
) -> Result<Signal<T, D>, RateChangeError> {
    if rate == 0 {
        return Err(RateChangeError::ZeroRate);
    }
    let mut output = Signal::zeros(input.len() * rate);
    expand_into(&mut output, input, rate)?;
    Ok(output)
}

/// Dot product of `phase` with the input window that ends at `last` (inclusive).
///
/// Input samples outside `input` count as zero. Returns `None` when the window and the input do
/// not overlap at all.
#[inline]
pub(crate) fn truncated_dot_product<T: Sample>(input: &[T], phase: &[T], last: usize) -> Option<T> {
    // The window is input[last + 1 - phase.len() ..= last]; its start may be negative.
    let end = (last + 1).min(input.len());
    let first = (last + 1).saturating_sub(phase.len());
    if end <= first {
        return None;
    }
    let offset = first + phase.len() - (last + 1);
    let count = end - first;
    Some(dot_product(
        &input[first..end],
        &phase[offset..offset + count],
    ))
}

/// Computes `hr_output.len()` samples of the interpolated signal starting at `hr_offset`.
///
/// The interpolated signal is `expand(lr_input, P)` convolved with the filter behind `polyphase`,
/// where `P` is its phase count. Neither the expanded input nor the full filter is built.
/// Output samples whose convolution window misses the input entirely are left untouched.
///
/// `hr_offset + hr_output.len()` must not exceed the full convolution length,
/// `lr_input.len() * P + filter_len - 1`.
pub fn interpolate_into<T: Sample, D: Domain>(
    hr_output: &mut [T],
    lr_input: &[T],
    polyphase: &PolyphaseView<'_, T, D>,
    hr_offset: usize,
) -> Result<(), InterpolateError> {
    let rate = polyphase.filter_count();
    let max_len = convolution_length(
        lr_input.len() * rate,
        polyphase.original_size(),
        ConvolutionMode::Full,
    );
    let end = hr_offset + hr_output.len();
    if end > max_len {
        #[cfg(feature = "tracing")]
        tracing::debug!(end, max_len, "interpolation window past the end of the signal");
        return Err(InterpolateError::OutputTooLong { end, max_len });
    }

    for (hr_index, out) in (hr_offset..).zip(hr_output.iter_mut()) {
        let phase = &polyphase[hr_index % rate];
        if let Some(value) = truncated_dot_product(lr_input, phase, hr_index / rate) {
            *out = value;
        }
    }
    Ok(())
}

/// Allocating form of [`interpolate_into`]; samples outside the input are zero.
pub fn interpolate<T: Sample, D: Domain>(
    lr_input: &[T],
    polyphase: &PolyphaseView<'_, T, D>,
    hr_offset: usize,
    hr_length: usize,
) -> Result<Signal<T, D>, InterpolateError> {
    let mut output = Signal::zeros(hr_length);
    interpolate_into(&mut output, lr_input, polyphase, hr_offset)?;
    Ok(output)
}
