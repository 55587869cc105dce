#![allow(dead_code)]
/// in separate folder so its not ran as integration test
use std::f64::consts::TAU;

use multirate::convolution::{convolve, ConvolutionMode};
use multirate::interpolation::expand;
use multirate::TimeSignal;

/// `0, 1, 2, ...`
pub fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

/// A sine of `frequency` cycles per sample.
pub fn sine(len: usize, frequency: f64) -> Vec<f64> {
    (0..len).map(|i| (TAU * frequency * i as f64).sin()).collect()
}

/// Zero-stuffs `input` by `rate` and convolves it with `filter`: what polyphase
/// interpolation computes without building either.
pub fn interpolate_directly(input: &[f64], filter: &[f64], rate: usize) -> Vec<f64> {
    let expanded = expand(&TimeSignal::from_slice(input), rate).expect("non-zero rate");
    convolve(&expanded, filter, ConvolutionMode::Full)
}
