//! Polyphase decomposition of FIR filters.
//!
//! Interpolating by `P` means filtering a signal that has `P - 1` zeros stuffed between every
//! pair of samples. Only every `P`th tap of the filter ever meets a non-zero sample, and which
//! taps those are depends on the output index modulo `P`. Splitting the filter into those `P`
//! interleaved sub-filters ("phases") lets the interpolators run at the low rate without
//! materializing the zero-stuffed signal.
//!
//! Phase `i` holds the taps `h[i], h[i + P], h[i + 2P], ...` (commutator order), stored reversed
//! so that a plain dot product against the input window ending at the current sample yields the
//! filtered value. All phases live in one arena with a fixed stride of
//! [`PolyphaseView::phase_size`]; when the filter length is not a multiple of `P` the trailing
//! phases are one tap shorter and the rest of their slot is zero.

use std::marker::PhantomData;
use std::ops::Index;

use crate::common::assert_error_traits;
use crate::signal::{Domain, Signal, Time};
use crate::Sample;

/// Error that can occur when decomposing a filter.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum PolyphaseError {
    /// Zero phases were requested.
    #[error("A polyphase decomposition needs at least one phase")]
    NoPhases,
    /// The filter has no taps.
    #[error("Cannot decompose an empty filter")]
    EmptyFilter,
    /// The arena does not have room for exactly `phases × phase_size` taps.
    #[error("Arena holds {actual} taps but the decomposition needs {expected}")]
    ArenaSize {
        /// Required arena length.
        expected: usize,
        /// Length that was passed in.
        actual: usize,
    },
}
assert_error_traits!(PolyphaseError);

/// Maximum number of taps in any phase, `ceil(filter_size / num_phases)`.
#[inline]
pub const fn phase_size(filter_size: usize, num_phases: usize) -> usize {
    filter_size.div_ceil(num_phases)
}

/// Number of taps in phase `phase`, `ceil((filter_size - phase) / num_phases)`.
#[inline]
pub const fn phase_len(filter_size: usize, num_phases: usize, phase: usize) -> usize {
    if phase >= filter_size {
        0
    } else {
        (filter_size - phase).div_ceil(num_phases)
    }
}

/// Maps original tap `tap` to `(phase, position)`, where `position` indexes the reversed phase.
#[inline]
pub const fn commutator_index(tap: usize, filter_size: usize, num_phases: usize) -> (usize, usize) {
    let phase = tap % num_phases;
    let len = phase_len(filter_size, num_phases, phase);
    (phase, len - 1 - tap / num_phases)
}

/// Arena length needed to decompose `filter_size` taps into `num_phases` phases.
#[inline]
pub const fn arena_len(filter_size: usize, num_phases: usize) -> usize {
    num_phases * phase_size(filter_size, num_phases)
}

/// Read-only view of a filter bank stored in an arena.
#[derive(Debug, Clone, Copy)]
pub struct PolyphaseView<'a, T, D: Domain = Time> {
    arena: &'a [T],
    filter_count: usize,
    original_size: usize,
    domain: PhantomData<D>,
}

impl<'a, T, D: Domain> PolyphaseView<'a, T, D> {
    /// Number of phases, the interpolation factor the bank realizes.
    #[inline]
    pub fn filter_count(&self) -> usize {
        self.filter_count
    }

    /// Length of the filter before decomposition.
    #[inline]
    pub fn original_size(&self) -> usize {
        self.original_size
    }

    /// Maximum number of taps per phase.
    #[inline]
    pub fn phase_size(&self) -> usize {
        phase_size(self.original_size, self.filter_count)
    }

    /// The reversed taps of phase `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.filter_count()`.
    #[inline]
    pub fn phase(&self, index: usize) -> &'a [T] {
        assert!(index < self.filter_count, "phase index out of range");
        let start = index * self.phase_size();
        &self.arena[start..start + phase_len(self.original_size, self.filter_count, index)]
    }

    /// All phases in order.
    pub fn phases(&self) -> impl ExactSizeIterator<Item = &'a [T]> + '_ {
        (0..self.filter_count).map(move |index| self.phase(index))
    }

    /// Re-interleaves the phases into the original filter.
    pub fn reconstruct(&self) -> Signal<T, D>
    where
        T: Sample,
    {
        (0..self.original_size)
            .map(|tap| {
                let (phase, position) =
                    commutator_index(tap, self.original_size, self.filter_count);
                self.phase(phase)[position]
            })
            .collect()
    }
}

impl<T, D: Domain> Index<usize> for PolyphaseView<'_, T, D> {
    type Output = [T];

    #[inline]
    fn index(&self, index: usize) -> &[T] {
        self.phase(index)
    }
}

/// Decomposes `filter` into `num_phases` phases written to `arena`.
///
/// `arena` must hold exactly [`arena_len`] taps. The returned view borrows it; nothing else is
/// allocated.
pub fn polyphase_decompose<'a, T, D>(
    arena: &'a mut [T],
    filter: &Signal<T, D>,
    num_phases: usize,
) -> Result<PolyphaseView<'a, T, D>, PolyphaseError>
where
    T: Sample,
    D: Domain,
{
    if num_phases == 0 {
        return Err(PolyphaseError::NoPhases);
    }
    if filter.is_empty() {
        return Err(PolyphaseError::EmptyFilter);
    }
    let expected = arena_len(filter.len(), num_phases);
    if arena.len() != expected {
        return Err(PolyphaseError::ArenaSize {
            expected,
            actual: arena.len(),
        });
    }

    let stride = phase_size(filter.len(), num_phases);
    for (phase, slot) in arena.chunks_exact_mut(stride).enumerate() {
        let len = phase_len(filter.len(), num_phases, phase);
        let (taps, padding) = slot.split_at_mut(len);
        for (position, tap) in taps.iter_mut().rev().enumerate() {
            *tap = filter[phase + position * num_phases];
        }
        padding.fill(T::zero_value());
    }

    Ok(PolyphaseView {
        arena,
        filter_count: num_phases,
        original_size: filter.len(),
        domain: PhantomData,
    })
}

/// A filter bank that owns its arena.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyphaseFilter<T, D: Domain = Time> {
    arena: Vec<T>,
    filter_count: usize,
    original_size: usize,
    domain: PhantomData<D>,
}

impl<T: Sample> PolyphaseFilter<T, Time> {
    /// Decomposes time domain filter taps into `num_phases` phases.
    pub fn new(filter: &[T], num_phases: usize) -> Result<Self, PolyphaseError> {
        Self::from_signal(&Signal::from_slice(filter), num_phases)
    }
}

impl<T: Sample, D: Domain> PolyphaseFilter<T, D> {
    /// Decomposes `filter` into `num_phases` phases.
    pub fn from_signal(filter: &Signal<T, D>, num_phases: usize) -> Result<Self, PolyphaseError> {
        if num_phases == 0 {
            return Err(PolyphaseError::NoPhases);
        }
        let mut arena = vec![T::zero_value(); arena_len(filter.len(), num_phases)];
        polyphase_decompose(&mut arena, filter, num_phases)?;
        Ok(PolyphaseFilter {
            arena,
            filter_count: num_phases,
            original_size: filter.len(),
            domain: PhantomData,
        })
    }

    /// Borrows the bank.
    #[inline]
    pub fn view(&self) -> PolyphaseView<'_, T, D> {
        PolyphaseView {
            arena: &self.arena,
            filter_count: self.filter_count,
            original_size: self.original_size,
            domain: PhantomData,
        }
    }

    /// Number of phases.
    #[inline]
    pub fn filter_count(&self) -> usize {
        self.filter_count
    }

    /// Length of the filter before decomposition.
    #[inline]
    pub fn original_size(&self) -> usize {
        self.original_size
    }
}
