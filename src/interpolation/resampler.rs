//! Streaming wrapper around [`resample_into`].

use std::num::NonZeroU32;

use super::resample::{resample_into, resampling_length, ResampleError, SampleRates};
use crate::convolution::ConvolutionMode;
use crate::polyphase::PolyphaseFilter;
use crate::rational::Rational;
use crate::signal::{Domain, Signal, Time};
use crate::Sample;

/// Resamples a stream that arrives in chunks of any size.
///
/// Keeps the input samples the filter still needs together with the continuation token between
/// calls. The concatenation of everything [`Resampler::process`] and [`Resampler::flush`] return
/// equals a single [`resample_into`] call over the whole stream.
///
/// ```rust
/// use multirate::interpolation::{Resampler, SampleRates};
/// use multirate::nz;
/// use multirate::polyphase::PolyphaseFilter;
///
/// let filter = PolyphaseFilter::new(&[0.5f32, 1.0, 0.5], 2)?;
/// let mut resampler = Resampler::new(filter, SampleRates::new(nz!(3), nz!(2)));
///
/// let mut output = resampler.process(&[1.0; 64])?.into_vec();
/// output.extend(resampler.process(&[1.0; 64])?);
/// output.extend(resampler.flush()?);
/// assert!(!output.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resampler<T, D: Domain = Time> {
    filter: PolyphaseFilter<T, D>,
    sample_rates: Rational<i64>,
    pending: Vec<T>,
    start_point: Rational<i64>,
}

impl<T: Sample, D: Domain> Resampler<T, D> {
    /// Resampler from `rates.source()` to `rates.target()` using `filter`.
    pub fn new(filter: PolyphaseFilter<T, D>, rates: SampleRates) -> Self {
        Resampler {
            filter,
            sample_rates: rates.ratio(),
            pending: Vec::new(),
            start_point: Rational::from_integer(0),
        }
    }

    /// Resampler with an explicit ratio of input samples per output sample.
    pub fn with_ratio(
        filter: PolyphaseFilter<T, D>,
        sample_rates: Rational<i64>,
    ) -> Result<Self, ResampleError> {
        if sample_rates <= 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(%sample_rates, "rejected non-positive sample rate ratio");
            return Err(ResampleError::NonPositiveRatio(sample_rates));
        }
        Ok(Resampler {
            filter,
            sample_rates,
            pending: Vec::new(),
            start_point: Rational::from_integer(0),
        })
    }

    /// Changes the input and output rate, keeping the current position in the stream.
    ///
    /// The next output sample is produced at the position the old rate would have put it.
    pub fn set_sample_rates(&mut self, rates: SampleRates) {
        let input_position = self.start_point * self.sample_rates;
        self.sample_rates = rates.ratio();
        self.start_point = input_position / self.sample_rates;
    }

    /// Input samples per output sample.
    #[inline]
    pub fn sample_rates(&self) -> Rational<i64> {
        self.sample_rates
    }

    /// The filter bank in use.
    #[inline]
    pub fn filter(&self) -> &PolyphaseFilter<T, D> {
        &self.filter
    }

    /// Input samples held back for the next call.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Appends `chunk` to the stream and returns every output sample that no longer depends on
    /// future input.
    pub fn process(&mut self, chunk: &[T]) -> Result<Signal<T, D>, ResampleError> {
        self.pending.extend_from_slice(chunk);

        // Output position `p` reads input up to `floor(p * ratio) + 1`.
        let available = Rational::from_integer(self.pending.len() as i64 - 1) / self.sample_rates;
        let ready = count(available - self.start_point).min(self.remaining());
        self.produce(ready)
    }

    /// Ends the stream, returning the output samples that depend on the zero-padded tail.
    ///
    /// The resampler is ready for a new stream afterwards.
    pub fn flush(&mut self) -> Result<Signal<T, D>, ResampleError> {
        let output = self.produce(self.remaining())?;
        self.reset();
        Ok(output)
    }

    /// Drops all pending input and starts over at output position zero.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.start_point = Rational::from_integer(0);
    }

    /// Number of output samples left before the end of the pending input's resampled length.
    fn remaining(&self) -> usize {
        let view = self.filter.view();
        let max_len = resampling_length(
            self.pending.len(),
            view.original_size(),
            view.filter_count(),
            self.sample_rates,
            ConvolutionMode::Full,
        );
        // the last output must lie strictly before `max_len`
        count(max_len - self.start_point).saturating_sub(1)
    }

    fn produce(&mut self, len: usize) -> Result<Signal<T, D>, ResampleError> {
        let mut output = Signal::zeros(len);
        if len == 0 {
            return Ok(output);
        }
        let params = resample_into(
            &mut output,
            &self.pending,
            &self.filter.view(),
            self.sample_rates,
            self.start_point,
        )?;
        self.pending.drain(..params.first_input_sample);
        self.start_point = params.start_point;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            produced = len,
            pending = self.pending.len(),
            start_point = %self.start_point,
            "resampler advanced"
        );
        Ok(output)
    }
}

impl<T: Sample> Resampler<T, Time> {
    /// Resampler from `source` Hz to `target` Hz that decomposes `filter` into `num_phases`
    /// phases.
    ///
    /// See [`crate::filter::design_resampling_filter`] for a suitable filter.
    pub fn from_taps(
        filter: &[T],
        num_phases: usize,
        source: NonZeroU32,
        target: NonZeroU32,
    ) -> Result<Self, crate::polyphase::PolyphaseError> {
        let filter = PolyphaseFilter::new(filter, num_phases)?;
        Ok(Resampler::new(filter, SampleRates::new(source, target)))
    }
}

/// `ceil(value)` clamped at zero.
fn count(value: Rational<i64>) -> usize {
    usize::try_from(value.ceil()).unwrap_or(0)
}
