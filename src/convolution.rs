//! Convolution lengths and direct time-domain convolution.

use crate::kernels::dot_product;
use crate::Sample;

/// Which part of a linear convolution to produce.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvolutionMode {
    /// Every output sample the two sequences overlap for, `a + b - 1` samples.
    #[default]
    Full,
    /// Only the samples where the shorter sequence fully overlaps the longer one,
    /// `max(a, b) - min(a, b) + 1` samples.
    Central,
}

/// Number of samples a convolution of sequences of length `a` and `b` produces.
///
/// Zero if either sequence is empty.
pub const fn convolution_length(a: usize, b: usize, mode: ConvolutionMode) -> usize {
    if a == 0 || b == 0 {
        return 0;
    }
    match mode {
        ConvolutionMode::Full => a + b - 1,
        ConvolutionMode::Central => {
            let (min, max) = if a < b { (a, b) } else { (b, a) };
            max - min + 1
        }
    }
}

/// Index of the first full-convolution sample that `mode` keeps.
const fn first_index(a: usize, b: usize, mode: ConvolutionMode) -> usize {
    match mode {
        ConvolutionMode::Full => 0,
        ConvolutionMode::Central => {
            if a < b {
                a - 1
            } else {
                b - 1
            }
        }
    }
}

/// Convolve `input` with `filter`, writing the part selected by `mode` into `out`.
///
/// Samples outside either sequence count as zero.
///
/// # Panics
///
/// Panics if `out.len()` differs from [`convolution_length`].
pub fn convolve_into<T: Sample>(out: &mut [T], input: &[T], filter: &[T], mode: ConvolutionMode) {
    let expected = convolution_length(input.len(), filter.len(), mode);
    assert_eq!(out.len(), expected, "output length must match the convolution length");
    if expected == 0 {
        return;
    }

    let first = first_index(input.len(), filter.len(), mode);
    let mut reversed = filter.to_vec();
    reversed.reverse();

    for (n, o) in (first..).zip(out.iter_mut()) {
        // input[k] * filter[n - k] over all valid k
        let k_first = (n + 1).saturating_sub(filter.len());
        let k_last = n.min(input.len() - 1);
        let count = k_last + 1 - k_first;
        let filter_offset = k_first + filter.len() - 1 - n;
        *o = dot_product(
            &input[k_first..=k_last],
            &reversed[filter_offset..filter_offset + count],
        );
    }
}

/// Allocating form of [`convolve_into`].
pub fn convolve<T: Sample>(input: &[T], filter: &[T], mode: ConvolutionMode) -> Vec<T> {
    let mut out = vec![T::zero_value(); convolution_length(input.len(), filter.len(), mode)];
    convolve_into(&mut out, input, filter, mode);
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, 3, ConvolutionMode::Full, 7)]
    #[case(3, 5, ConvolutionMode::Full, 7)]
    #[case(5, 3, ConvolutionMode::Central, 3)]
    #[case(3, 5, ConvolutionMode::Central, 3)]
    #[case(4, 4, ConvolutionMode::Central, 1)]
    #[case(0, 4, ConvolutionMode::Full, 0)]
    #[case(4, 0, ConvolutionMode::Central, 0)]
    fn lengths(
        #[case] a: usize,
        #[case] b: usize,
        #[case] mode: ConvolutionMode,
        #[case] expected: usize,
    ) {
        assert_eq!(convolution_length(a, b, mode), expected);
    }

    #[test]
    fn full_convolution() {
        let out = convolve(&[1.0f32, 2.0, 3.0], &[1.0, 1.0], ConvolutionMode::Full);
        assert_eq!(out, vec![1.0, 3.0, 5.0, 3.0]);
    }

    #[test]
    fn central_convolution() {
        let out = convolve(&[1.0f64, 2.0, 3.0, 4.0], &[1.0, 0.0, -1.0], ConvolutionMode::Central);
        // full: [1, 2, 2, 2, -3, -4]
        assert_eq!(out, vec![2.0, 2.0]);
    }

    #[test]
    fn commutes() {
        let a = [0.5f64, -1.0, 2.0, 0.25, 3.0];
        let b = [1.0f64, 2.0];
        assert_eq!(
            convolve(&a, &b, ConvolutionMode::Full),
            convolve(&b, &a, ConvolutionMode::Full)
        );
    }
}
