//! Multirate signal processing with polyphase FIR filters.
//!
//! The crate is built around three operations:
//!
//! - [`polyphase_decompose`] splits a FIR filter into the interleaved sub-filters a polyphase
//!   interpolator runs at the low rate.
//! - [`interpolate`](interpolation::interpolate) upsamples by an integer factor, and any window
//!   of the result can be computed on its own.
//! - [`resample`](interpolation::resample) converts between arbitrary rational rates. Positions
//!   are tracked as exact fractions, so a stream cut into chunks produces exactly the same samples
//!   as one long call, with no drift however long it runs.
//!
//! Around them sit the usual supporting pieces: a domain-tagged [`Signal`] buffer, elementwise
//! [`kernels`], direct [`convolution`], window-based [`filter`] design and the exact
//! [`Rational`] type.
//!
//! # Example
//!
//! Resampling a stream from 44.1 kHz to 48 kHz, one chunk at a time:
//!
//! ```rust
//! use multirate::filter::{design_resampling_filter, Window};
//! use multirate::interpolation::{Resampler, SampleRates};
//! use multirate::{nz, PolyphaseFilter};
//!
//! let rates = SampleRates::new(nz!(44_100), nz!(48_000));
//! let taps = design_resampling_filter(rates.ratio(), 16, 16 * 24 + 1, Window::Kaiser(8.0))?;
//! let mut resampler = Resampler::new(PolyphaseFilter::new(&taps, 16)?, rates);
//!
//! let chunk = vec![0.0; 4410];
//! let mut produced = 0;
//! for _ in 0..10 {
//!     produced += resampler.process(&chunk)?.len();
//! }
//! produced += resampler.flush()?.len();
//! assert!(produced >= 48_000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Optional Features
//!
//! - `tracing`: emits `trace` events for every resampled chunk and `debug` events for rejected
//!   arguments.
//! - `64bit`: [`Float`], the type the filter designer produces, becomes `f64`.
//! - `rayon`: enables [`resample_par_into`](interpolation::resample_par_into).
//! - `serde`: makes [`ContinuationParams`](interpolation::ContinuationParams) and [`Rational`]
//!   serializable, so a stream can be suspended and resumed elsewhere.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod common;
mod sample;

pub mod convolution;
pub mod filter;
pub mod interpolation;
pub mod kernels;
pub mod polyphase;
pub mod rational;
pub mod signal;

pub use crate::common::Float;
pub use crate::convolution::ConvolutionMode;
pub use crate::polyphase::{polyphase_decompose, PolyphaseFilter, PolyphaseView};
pub use crate::rational::Rational;
pub use crate::sample::Sample;
pub use crate::signal::{Domain, Frequency, Signal, Spectrum, Time, TimeSignal};
