use std::num::NonZeroU32;

use crate::common::assert_error_traits;
use crate::convolution::{convolution_length, ConvolutionMode};
use crate::polyphase::PolyphaseView;
use crate::rational::Rational;
use crate::signal::{Domain, Signal};
use crate::Sample;

use super::truncated_dot_product;

/// Output samples computed per rayon task by [`resample_par_into`].
#[cfg(feature = "rayon")]
const PAR_CHUNK: usize = 1024;

/// A pair of sample rates in Hz.
///
/// The resampler works with the exact ratio of input samples per output sample. Building it from
/// named rates keeps source and target from being swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleRates {
    source: NonZeroU32,
    target: NonZeroU32,
}

impl SampleRates {
    /// Converting from `source` Hz to `target` Hz.
    #[inline]
    pub const fn new(source: NonZeroU32, target: NonZeroU32) -> Self {
        SampleRates { source, target }
    }

    /// The rate of the input.
    #[inline]
    pub fn source(&self) -> NonZeroU32 {
        self.source
    }

    /// The rate of the output.
    #[inline]
    pub fn target(&self) -> NonZeroU32 {
        self.target
    }

    /// Input samples per output sample, `source / target`, in lowest terms.
    #[inline]
    pub fn ratio(&self) -> Rational<i64> {
        Rational::new(
            i64::from(self.source.get()),
            i64::from(self.target.get()),
        )
    }
}

impl From<SampleRates> for Rational<i64> {
    fn from(rates: SampleRates) -> Self {
        rates.ratio()
    }
}

/// Error that can occur when resampling.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum ResampleError {
    /// The ratio of input to output samples was zero or negative.
    #[error("Sample rate ratio must be positive, got {0}")]
    NonPositiveRatio(Rational<i64>),
    /// The first output position lies before the start of the signal.
    #[error("Start point must not be negative, got {0}")]
    NegativeStartPoint(Rational<i64>),
    /// The requested output extends past the end of the resampled signal.
    #[error("Requested output up to {end} but the resampled signal ends at {max_len}")]
    OutputTooLong {
        /// `start_point + output.len()`.
        end: Rational<i64>,
        /// Length of the resampled signal, see [`resampling_length`].
        max_len: Rational<i64>,
    },
}
assert_error_traits!(ResampleError);

/// Where to pick up the next chunk of a stream.
///
/// Drop the first `first_input_sample` samples of the input buffer, append new input and pass
/// `start_point` to the next call. The resampler never needs the dropped samples again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuationParams {
    /// Number of leading input samples that can be discarded.
    pub first_input_sample: usize,
    /// Output position of the next sample, relative to the trimmed input.
    pub start_point: Rational<i64>,
}

/// Length, in output samples, of `input_size` input samples after resampling.
///
/// This is the length of the interpolated signal for `mode` (see
/// [`convolution_length`]) expressed in output samples. It is usually not an integer.
///
/// # Panics
///
/// Panics if `num_phases` or `sample_rates` is zero.
pub fn resampling_length(
    input_size: usize,
    filter_size: usize,
    num_phases: usize,
    sample_rates: Rational<i64>,
    mode: ConvolutionMode,
) -> Rational<i64> {
    let length = convolution_length(input_size * num_phases, filter_size, mode);
    Rational::from_integer(length as i64) / sample_rates / num_phases as i64
}

/// Cutoff, relative to the Nyquist frequency of the interpolated signal, that a resampling
/// filter with `num_phases` phases needs to suppress both imaging and aliasing.
pub fn resampling_filter_cutoff(sample_rates: Rational<i64>, num_phases: usize) -> f64 {
    (1.0 / num_phases as f64) * f64::min(1.0, 1.0 / sample_rates.to_f64())
}

/// Group delay of a symmetric resampling filter, in output samples.
///
/// # Panics
///
/// Panics if `num_phases` or `sample_rates` is zero.
pub fn resampling_delay(
    filter_size: usize,
    num_phases: usize,
    sample_rates: Rational<i64>,
) -> Rational<i64> {
    Rational::new(filter_size as i64 - 1, 2 * num_phases as i64) / sample_rates
}

/// Converts a sample position counted at `source` Hz into one counted at `target` Hz.
pub fn change_sample_rate(
    source: NonZeroU32,
    target: NonZeroU32,
    sample: Rational<i64>,
) -> Rational<i64> {
    sample * i64::from(target.get()) / i64::from(source.get())
}

/// The continuation after producing every output sample before `next_output_sample`.
///
/// # Panics
///
/// Panics if `num_phases` or `sample_rates` is zero.
pub fn continuation(
    next_output_sample: Rational<i64>,
    filter_size: usize,
    num_phases: usize,
    sample_rates: Rational<i64>,
) -> ContinuationParams {
    let next_input_sample = next_output_sample * sample_rates;
    let offset = Rational::new(filter_size as i64 - 1, num_phases as i64);
    let first_input_sample = next_input_sample - offset;
    if first_input_sample <= 0 {
        return ContinuationParams {
            first_input_sample: 0,
            start_point: next_output_sample,
        };
    }
    ContinuationParams {
        first_input_sample: first_input_sample.floor() as usize,
        start_point: (first_input_sample.frac() + offset) / sample_rates,
    }
}

fn check_preconditions(
    output_len: usize,
    input_len: usize,
    filter_size: usize,
    num_phases: usize,
    sample_rates: Rational<i64>,
    start_point: Rational<i64>,
) -> Result<(), ResampleError> {
    if sample_rates <= 0 {
        #[cfg(feature = "tracing")]
        tracing::debug!(%sample_rates, "rejected non-positive sample rate ratio");
        return Err(ResampleError::NonPositiveRatio(sample_rates));
    }
    if start_point < 0 {
        #[cfg(feature = "tracing")]
        tracing::debug!(%start_point, "rejected negative start point");
        return Err(ResampleError::NegativeStartPoint(start_point));
    }
    let end = start_point + output_len as i64;
    let max_len = resampling_length(
        input_len,
        filter_size,
        num_phases,
        sample_rates,
        ConvolutionMode::Full,
    );
    if end >= max_len {
        #[cfg(feature = "tracing")]
        tracing::debug!(%end, %max_len, "rejected output past the end of the signal");
        return Err(ResampleError::OutputTooLong { end, max_len });
    }
    Ok(())
}

/// Computes the output samples at `start_point, start_point + 1, ...` without any checks.
fn resample_range<T: Sample, D: Domain>(
    output: &mut [T],
    input: &[T],
    polyphase: &PolyphaseView<'_, T, D>,
    sample_rates: Rational<i64>,
    start_point: Rational<i64>,
) {
    let num_phases = polyphase.filter_count();
    let candidate = |phase: usize, last: usize| {
        truncated_dot_product(input, &polyphase[phase], last).unwrap_or_else(T::zero_value)
    };

    for (position, out) in (0i64..).zip(output.iter_mut()) {
        let input_index = (start_point + position) * sample_rates;
        let scaled = input_index.frac() * num_phases as i64;
        let first_phase = scaled.floor() as usize;
        let second_phase = (first_phase + 1) % num_phases;

        // Cross-fade between the two phases around the exact position.
        let weight = scaled.frac();
        let second_weight = weight.numer() as u64;
        let first_weight = (weight.denom() - weight.numer()) as u64;

        let first_index = input_index.floor() as usize;
        let second_index = if second_phase == 0 {
            first_index + 1
        } else {
            first_index
        };

        *out = T::blend(
            candidate(first_phase, first_index),
            first_weight,
            candidate(second_phase, second_index),
            second_weight,
        );
    }
}

/// Resamples `input` by `sample_rates` (input samples per output sample), filling `output` with
/// the output samples at positions `start_point, start_point + 1, ...`.
///
/// Output position `k` maps to input position `k * sample_rates`. The filter is evaluated at the
/// two phases surrounding that position and the results are blended by their exact distance, so
/// the output is a band-limited interpolation with `filter_count()` phases of resolution.
/// Samples outside `input` count as zero.
///
/// Returns the [`ContinuationParams`] for producing the samples that follow `output`.
///
/// `sample_rates` must be positive, `start_point` must not be negative and
/// `start_point + output.len()` must stay below [`resampling_length`]. Nothing is written when a
/// check fails.
///
/// # Example
///
/// ```rust
/// use multirate::interpolation::resample_into;
/// use multirate::polyphase::PolyphaseFilter;
/// use multirate::Rational;
///
/// let identity = PolyphaseFilter::new(&[1.0f32], 1)?;
/// let input = [1.0f32, 2.0, 3.0, 4.0];
/// let mut output = [0.0f32; 3];
/// resample_into(&mut output, &input, &identity.view(), Rational::from_integer(1), Rational::from_integer(0))?;
/// assert_eq!(output, [1.0, 2.0, 3.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resample_into<T: Sample, D: Domain>(
    output: &mut [T],
    input: &[T],
    polyphase: &PolyphaseView<'_, T, D>,
    sample_rates: Rational<i64>,
    start_point: Rational<i64>,
) -> Result<ContinuationParams, ResampleError> {
    check_preconditions(
        output.len(),
        input.len(),
        polyphase.original_size(),
        polyphase.filter_count(),
        sample_rates,
        start_point,
    )?;

    resample_range(output, input, polyphase, sample_rates, start_point);

    let params = continuation(
        start_point + output.len() as i64,
        polyphase.original_size(),
        polyphase.filter_count(),
        sample_rates,
    );
    #[cfg(feature = "tracing")]
    tracing::trace!(
        produced = output.len(),
        first_input_sample = params.first_input_sample,
        start_point = %params.start_point,
        "resampled chunk"
    );
    Ok(params)
}

/// Same as [`resample_into`], with the output range split across the rayon thread pool.
///
/// Every output sample is computed exactly as in the serial version, so the results are
/// identical.
#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
pub fn resample_par_into<T: Sample, D: Domain>(
    output: &mut [T],
    input: &[T],
    polyphase: &PolyphaseView<'_, T, D>,
    sample_rates: Rational<i64>,
    start_point: Rational<i64>,
) -> Result<ContinuationParams, ResampleError> {
    use rayon::prelude::*;

    check_preconditions(
        output.len(),
        input.len(),
        polyphase.original_size(),
        polyphase.filter_count(),
        sample_rates,
        start_point,
    )?;

    output
        .par_chunks_mut(PAR_CHUNK)
        .enumerate()
        .for_each(|(index, chunk)| {
            let chunk_start = start_point + (index * PAR_CHUNK) as i64;
            resample_range(chunk, input, polyphase, sample_rates, chunk_start);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                index,
                produced = chunk.len(),
                start_point = %chunk_start,
                "resampled parallel chunk"
            );
        });

    Ok(continuation(
        start_point + output.len() as i64,
        polyphase.original_size(),
        polyphase.filter_count(),
        sample_rates,
    ))
}

/// Allocating form of [`resample_into`], producing `length` samples.
pub fn resample<T: Sample, D: Domain>(
    input: &[T],
    polyphase: &PolyphaseView<'_, T, D>,
    sample_rates: Rational<i64>,
    start_point: Rational<i64>,
    length: usize,
) -> Result<(Signal<T, D>, ContinuationParams), ResampleError> {
    let mut output = Signal::zeros(length);
    let params = resample_into(&mut output, input, polyphase, sample_rates, start_point)?;
    Ok((output, params))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nz;
    use crate::polyphase::PolyphaseFilter;

    fn r(numer: i64, denom: i64) -> Rational<i64> {
        Rational::new(numer, denom)
    }

    #[test]
    fn sample_rates_ratio() {
        let rates = SampleRates::new(nz!(48_000), nz!(16_000));
        assert_eq!(rates.ratio(), r(3, 1));
        assert_eq!(Rational::from(SampleRates::new(nz!(16_000), nz!(48_000))), r(1, 3));
    }

    #[test]
    fn auxiliary_functions() {
        assert_eq!(
            resampling_length(10, 5, 4, r(1, 2), ConvolutionMode::Full),
            r(2 * 44, 4)
        );
        // central keeps the 40 interpolated samples minus the 5 - 1 filter tail
        assert_eq!(
            resampling_length(10, 5, 4, r(1, 2), ConvolutionMode::Central),
            r(18, 1)
        );
        assert_eq!(resampling_delay(9, 4, r(1, 1)), r(1, 1));
        assert_eq!(resampling_delay(9, 4, r(2, 1)), r(1, 2));
        assert_eq!(resampling_filter_cutoff(r(1, 2), 4), 0.25);
        assert_eq!(resampling_filter_cutoff(r(2, 1), 4), 0.125);
        assert_eq!(change_sample_rate(nz!(44_100), nz!(88_200), r(3, 1)), r(6, 1));
    }

    #[test]
    fn continuation_before_and_after_filter_warmup() {
        // offset = 8 / 4 = 2
        assert_eq!(
            continuation(r(3, 1), 9, 4, r(1, 2)),
            ContinuationParams {
                first_input_sample: 0,
                start_point: r(3, 1)
            }
        );
        // next input = 10 * 3/2 = 15, first = 13
        assert_eq!(
            continuation(r(10, 1), 9, 4, r(3, 2)),
            ContinuationParams {
                first_input_sample: 13,
                start_point: r(4, 3)
            }
        );
    }

    #[test]
    fn identity_filter_copies_input() {
        let filter = PolyphaseFilter::new(&[1.0f64], 1).unwrap();
        let input = [0.5f64, -1.0, 2.0, 3.0];
        let (output, params) =
            resample(&input, &filter.view(), r(1, 1), r(0, 1), 3).unwrap();
        assert_eq!(output.as_slice(), &input[..3]);
        assert_eq!(params.first_input_sample, 3);
        assert_eq!(params.start_point, r(0, 1));
    }

    #[test]
    fn half_position_blends_phases() {
        // phase 0 = [1], phase 1 = [0]
        let filter = PolyphaseFilter::new(&[1.0f64, 0.0], 2).unwrap();
        let input = [0.0f64, 4.0, 8.0];
        let mut output = [0.0f64; 4];
        resample_into(&mut output, &input, &filter.view(), r(1, 4), r(0, 1)).unwrap();
        // positions 0, 1/4, 1/2, 3/4 of the input; phase 1 contributes zeros
        assert_eq!(output, [0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn rejects_bad_arguments_without_writing() {
        let filter = PolyphaseFilter::new(&[1.0f32, 1.0], 2).unwrap();
        let view = filter.view();
        let input = [1.0f32; 4];
        let mut output = [7.0f32; 4];

        assert_eq!(
            resample_into(&mut output, &input, &view, r(0, 1), r(0, 1)),
            Err(ResampleError::NonPositiveRatio(r(0, 1)))
        );
        assert_eq!(
            resample_into(&mut output, &input, &view, r(1, 1), r(-1, 2)),
            Err(ResampleError::NegativeStartPoint(r(-1, 2)))
        );
        // max length = (4 * 2 + 1) / 2 = 9/2
        assert_eq!(
            resample_into(&mut output, &input, &view, r(1, 1), r(1, 1)),
            Err(ResampleError::OutputTooLong {
                end: r(5, 1),
                max_len: r(9, 2)
            })
        );
        assert_eq!(output, [7.0; 4]);
    }
}
