use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Represents the value of a single sample or filter coefficient.
///
/// This trait is implemented for `f32` and `f64`. The polyphase kernels only ever add, multiply
/// and, when blending two phase candidates, divide by a sum of integer weights, so any type closed
/// under those operations can implement it.
pub trait Sample:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
{
    /// Returns the additive identity, the value of silence.
    fn zero_value() -> Self;

    /// Converts an integer cross-fade weight into a sample value.
    fn from_weight(weight: u64) -> Self;

    /// Weighted average of two samples.
    ///
    /// The result is `(first * first_weight + second * second_weight) / (first_weight +
    /// second_weight)`, evaluated in that order. The weights must not both be zero.
    #[inline]
    fn blend(first: Self, first_weight: u64, second: Self, second_weight: u64) -> Self {
        let first_weight = Self::from_weight(first_weight);
        let second_weight = Self::from_weight(second_weight);
        (first * first_weight + second * second_weight) / (first_weight + second_weight)
    }
}

impl Sample for f32 {
    #[inline]
    fn zero_value() -> f32 {
        0.0
    }

    #[inline]
    fn from_weight(weight: u64) -> f32 {
        weight as f32
    }
}

impl Sample for f64 {
    #[inline]
    fn zero_value() -> f64 {
        0.0
    }

    #[inline]
    fn from_weight(weight: u64) -> f64 {
        weight as f64
    }
}
