//! Owned sample buffers tagged with the domain they live in.
//!
//! A [`Signal`] never changes length after construction and dereferences to a slice, so
//! sub-range views are plain slices: `&signal[offset..offset + len]`. The domain tag keeps time
//! series and spectra from being mixed up; arithmetic between signals only compiles when the
//! tags match.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::{
    Add, AddAssign, Deref, DerefMut, Div, DivAssign, Mul, MulAssign, Sub, SubAssign,
};

use crate::kernels;
use crate::Sample;

mod sealed {
    pub trait Sealed {}
}

/// Marker for the domain a signal lives in.
///
/// This trait is sealed; [`Time`] and [`Frequency`] are the only implementations.
pub trait Domain: sealed::Sealed + Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Human readable name, used in diagnostics.
    const NAME: &'static str;
}

/// Samples indexed by time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Time;

/// Bins indexed by frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Frequency;

impl sealed::Sealed for Time {}
impl sealed::Sealed for Frequency {}

impl Domain for Time {
    const NAME: &'static str = "time";
}

impl Domain for Frequency {
    const NAME: &'static str = "frequency";
}

/// Fixed-size owned buffer of samples.
#[derive(Clone, PartialEq)]
pub struct Signal<T, D: Domain = Time> {
    samples: Vec<T>,
    domain: PhantomData<D>,
}

/// A signal in the time domain.
pub type TimeSignal<T> = Signal<T, Time>;

/// A signal in the frequency domain.
pub type Spectrum<T> = Signal<T, Frequency>;

impl<T, D: Domain> Signal<T, D> {
    /// Takes ownership of `samples`.
    #[inline]
    pub fn from_vec(samples: Vec<T>) -> Self {
        Signal {
            samples,
            domain: PhantomData,
        }
    }

    /// A signal of `len` copies of `value`.
    #[inline]
    pub fn filled(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Signal::from_vec(vec![value; len])
    }

    /// Copies `samples` into a new signal.
    #[inline]
    pub fn from_slice(samples: &[T]) -> Self
    where
        T: Clone,
    {
        Signal::from_vec(samples.to_vec())
    }

    /// The samples as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.samples
    }

    /// The samples as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.samples
    }

    /// `len` samples starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range does not lie inside the signal.
    #[inline]
    pub fn sub_signal(&self, offset: usize, len: usize) -> &[T] {
        &self.samples[offset..offset + len]
    }

    /// Mutable variant of [`Signal::sub_signal`].
    #[inline]
    pub fn sub_signal_mut(&mut self, offset: usize, len: usize) -> &mut [T] {
        &mut self.samples[offset..offset + len]
    }

    /// Returns the underlying buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.samples
    }
}

impl<T: Sample, D: Domain> Signal<T, D> {
    /// A signal of `len` zeros.
    #[inline]
    pub fn zeros(len: usize) -> Self {
        Signal::filled(len, T::zero_value())
    }
}

impl<T: Debug, D: Domain> Debug for Signal<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("domain", &D::NAME)
            .field("samples", &self.samples)
            .finish()
    }
}

impl<T, D: Domain> Default for Signal<T, D> {
    fn default() -> Self {
        Signal::from_vec(Vec::new())
    }
}

impl<T, D: Domain> Deref for Signal<T, D> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.samples
    }
}

impl<T, D: Domain> DerefMut for Signal<T, D> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }
}

impl<T, D: Domain> AsRef<[T]> for Signal<T, D> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.samples
    }
}

impl<T, D: Domain> AsMut<[T]> for Signal<T, D> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }
}

impl<T, D: Domain> From<Vec<T>> for Signal<T, D> {
    #[inline]
    fn from(samples: Vec<T>) -> Self {
        Signal::from_vec(samples)
    }
}

impl<T, D: Domain> FromIterator<T> for Signal<T, D> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Signal::from_vec(iter.into_iter().collect())
    }
}

impl<T, D: Domain> IntoIterator for Signal<T, D> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a, T, D: Domain> IntoIterator for &'a Signal<T, D> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl<'a, T, D: Domain> IntoIterator for &'a mut Signal<T, D> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter_mut()
    }
}

macro_rules! signal_arithmetic {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $kernel:ident, $kernel_scalar:ident) => {
        impl<T: Sample, D: Domain> $op<&Signal<T, D>> for &Signal<T, D> {
            type Output = Signal<T, D>;

            /// # Panics
            ///
            /// Panics if the signals differ in length.
            fn $method(self, rhs: &Signal<T, D>) -> Signal<T, D> {
                let mut out = Signal::zeros(self.len());
                kernels::$kernel(&mut out, self, rhs);
                out
            }
        }

        impl<T: Sample, D: Domain> $op<T> for &Signal<T, D> {
            type Output = Signal<T, D>;

            fn $method(self, rhs: T) -> Signal<T, D> {
                let mut out = Signal::zeros(self.len());
                kernels::$kernel_scalar(&mut out, self, rhs);
                out
            }
        }

        impl<T: Sample, D: Domain> $op_assign<&Signal<T, D>> for Signal<T, D> {
            /// # Panics
            ///
            /// Panics if the signals differ in length.
            fn $method_assign(&mut self, rhs: &Signal<T, D>) {
                kernels::binary_operation_in_place(self, rhs, |a, b| $op::$method(a, b));
            }
        }

        impl<T: Sample, D: Domain> $op_assign<&[T]> for Signal<T, D> {
            fn $method_assign(&mut self, rhs: &[T]) {
                kernels::binary_operation_in_place(self, rhs, |a, b| $op::$method(a, b));
            }
        }

        impl<T: Sample, D: Domain> $op_assign<T> for Signal<T, D> {
            fn $method_assign(&mut self, rhs: T) {
                for sample in self.iter_mut() {
                    *sample = $op::$method(*sample, rhs);
                }
            }
        }
    };
}

signal_arithmetic!(Add, add, AddAssign, add_assign, add, add_scalar);
signal_arithmetic!(Sub, sub, SubAssign, sub_assign, subtract, subtract_scalar);
signal_arithmetic!(Mul, mul, MulAssign, mul_assign, multiply, multiply_scalar);
signal_arithmetic!(Div, div, DivAssign, div_assign, divide, divide_scalar);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn views_are_slices() {
        let mut signal = TimeSignal::from_vec(vec![1.0f32, 2.0, 3.0, 4.0]);
        assert_eq!(signal.sub_signal(1, 2), &[2.0, 3.0]);
        signal.sub_signal_mut(2, 2).fill(0.0);
        assert_eq!(signal.as_slice(), &[1.0, 2.0, 0.0, 0.0]);
        assert_eq!(signal.len(), 4);
    }

    #[test]
    #[should_panic]
    fn sub_signal_out_of_range() {
        let signal = TimeSignal::<f32>::zeros(3);
        let _ = signal.sub_signal(2, 2);
    }

    #[test]
    fn arithmetic_between_signals() {
        let a = Spectrum::from_vec(vec![1.0f64, 2.0, 3.0]);
        let b = Spectrum::from_vec(vec![2.0f64, 2.0, 2.0]);

        assert_eq!((&a + &b).as_slice(), &[3.0, 4.0, 5.0]);
        assert_eq!((&a - &b).as_slice(), &[-1.0, 0.0, 1.0]);
        assert_eq!((&a * &b).as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!((&a / &b).as_slice(), &[0.5, 1.0, 1.5]);
        assert_eq!((&a * 2.0).as_slice(), &[2.0, 4.0, 6.0]);

        let mut c = a.clone();
        c += &b;
        c *= 0.5;
        assert_eq!(c.as_slice(), &[1.5, 2.0, 2.5]);
        c -= &[0.5, 0.0, 0.5][..];
        assert_eq!(c.as_slice(), &[1.0, 2.0, 2.0]);
    }

    #[test]
    fn collects_and_iterates() {
        let signal: TimeSignal<f32> = (0..4).map(|i| i as f32).collect();
        let total: f32 = (&signal).into_iter().sum();
        assert_eq!(total, 6.0);
        assert_eq!(signal.into_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn debug_names_the_domain() {
        let signal = Spectrum::from_vec(vec![1.0f32]);
        assert!(format!("{signal:?}").contains("frequency"));
    }
}
