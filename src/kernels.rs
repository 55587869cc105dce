//! Elementwise arithmetic over sample slices.
//!
//! Every binary kernel comes in three shapes: vector–vector (`add`), vector–scalar
//! (`add_scalar`) and scalar–vector (`scalar_add`). The scalar–vector forms only differ from the
//! vector–scalar ones for the non-commutative operations.
//!
//! # Panics
//!
//! All kernels panic when the slice lengths differ. Mismatched lengths are a programming error,
//! and nothing is written in that case.

use std::ops::{Add, Div, Mul, Sub};

use crate::Sample;

#[inline]
fn binary_operation<R, T, U>(out: &mut [R], a: &[T], b: &[U], op: impl Fn(T, U) -> R)
where
    T: Copy,
    U: Copy,
{
    assert_eq!(out.len(), a.len(), "output and left operand lengths differ");
    assert_eq!(out.len(), b.len(), "output and right operand lengths differ");
    for ((o, &a), &b) in out.iter_mut().zip(a).zip(b) {
        *o = op(a, b);
    }
}

#[inline]
fn binary_operation_scalar<R, T, U>(out: &mut [R], a: &[T], b: U, op: impl Fn(T, U) -> R)
where
    T: Copy,
    U: Copy,
{
    assert_eq!(out.len(), a.len(), "output and operand lengths differ");
    for (o, &a) in out.iter_mut().zip(a) {
        *o = op(a, b);
    }
}

/// `out[i] = op(out[i], b[i])`
#[inline]
pub(crate) fn binary_operation_in_place<T, U>(out: &mut [T], b: &[U], op: impl Fn(T, U) -> T)
where
    T: Copy,
    U: Copy,
{
    assert_eq!(out.len(), b.len(), "operand lengths differ");
    for (o, &b) in out.iter_mut().zip(b) {
        *o = op(*o, b);
    }
}

macro_rules! kernel {
    ($name:ident, $scalar:ident, $scalar_first:ident, $op:ident, $method:ident, $sym:literal) => {
        #[doc = concat!("`out[i] = a[i] ", $sym, " b[i]`")]
        pub fn $name<R, T, U>(out: &mut [R], a: &[T], b: &[U])
        where
            T: Copy + $op<U, Output = R>,
            U: Copy,
        {
            binary_operation(out, a, b, |a, b| a.$method(b));
        }

        #[doc = concat!("`out[i] = a[i] ", $sym, " b`")]
        pub fn $scalar<R, T, U>(out: &mut [R], a: &[T], b: U)
        where
            T: Copy + $op<U, Output = R>,
            U: Copy,
        {
            binary_operation_scalar(out, a, b, |a, b| a.$method(b));
        }

        #[doc = concat!("`out[i] = a ", $sym, " b[i]`")]
        pub fn $scalar_first<R, T, U>(out: &mut [R], a: T, b: &[U])
        where
            T: Copy + $op<U, Output = R>,
            U: Copy,
        {
            binary_operation_scalar(out, b, a, |b, a| a.$method(b));
        }
    };
}

kernel!(add, add_scalar, scalar_add, Add, add, "+");
kernel!(subtract, subtract_scalar, scalar_subtract, Sub, sub, "-");
kernel!(multiply, multiply_scalar, scalar_multiply, Mul, mul, "*");
kernel!(divide, divide_scalar, scalar_divide, Div, div, "/");

/// Sum of the elementwise products of two equally long slices; zero for empty slices.
///
/// The products are accumulated front to back.
///
/// # Panics
///
/// Panics if the lengths differ.
#[inline]
pub fn dot_product<T: Sample>(a: &[T], b: &[T]) -> T {
    assert_eq!(a.len(), b.len(), "dot product operand lengths differ");
    a.iter()
        .zip(b)
        .fold(T::zero_value(), |acc, (&a, &b)| acc + a * b)
}

/// Sum of all elements; zero for an empty slice.
#[inline]
pub fn sum<T: Sample>(values: &[T]) -> T {
    values
        .iter()
        .fold(T::zero_value(), |acc, &value| acc + value)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vector_vector() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [4.0f32, 5.0, 6.0];
        let mut out = [0.0f32; 3];

        add(&mut out, &a, &b);
        assert_eq!(out, [5.0, 7.0, 9.0]);
        subtract(&mut out, &a, &b);
        assert_eq!(out, [-3.0, -3.0, -3.0]);
        multiply(&mut out, &a, &b);
        assert_eq!(out, [4.0, 10.0, 18.0]);
        divide(&mut out, &b, &a);
        assert_eq!(out, [4.0, 2.5, 2.0]);
    }

    #[test]
    fn scalar_operand_order() {
        let a = [1.0f64, 2.0, 4.0];
        let mut out = [0.0f64; 3];

        subtract_scalar(&mut out, &a, 1.0);
        assert_eq!(out, [0.0, 1.0, 3.0]);
        scalar_subtract(&mut out, 1.0, &a);
        assert_eq!(out, [0.0, -1.0, -3.0]);
        divide_scalar(&mut out, &a, 2.0);
        assert_eq!(out, [0.5, 1.0, 2.0]);
        scalar_divide(&mut out, 8.0, &a);
        assert_eq!(out, [8.0, 4.0, 2.0]);
        scalar_multiply(&mut out, 3.0, &a);
        assert_eq!(out, [3.0, 6.0, 12.0]);
        add_scalar(&mut out, &a, 0.5);
        assert_eq!(out, [1.5, 2.5, 4.5]);
    }

    #[test]
    #[should_panic]
    fn length_mismatch() {
        let mut out = [0.0f32; 2];
        add(&mut out, &[1.0f32, 2.0, 3.0], &[1.0f32, 2.0, 3.0]);
    }

    #[test]
    fn dot_product_and_sum() {
        assert_eq!(dot_product(&[1.0f32, 2.0, 3.0], &[3.0, 2.0, 1.0]), 10.0);
        assert_eq!(dot_product::<f32>(&[], &[]), 0.0);
        assert_eq!(sum(&[0.25f64, 0.25, 0.5]), 1.0);
    }
}
