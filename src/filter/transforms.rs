//! Transforms between lowpass, highpass, bandpass and Hilbert filters.

use super::{Coefficient, FilterError};

fn check_length(expected: usize, actual: usize) -> Result<(), FilterError> {
    if expected != actual {
        return Err(FilterError::LengthMismatch { expected, actual });
    }
    Ok(())
}

fn check_odd(len: usize) -> Result<(), FilterError> {
    if len % 2 == 0 {
        return Err(FilterError::EvenLength(len));
    }
    Ok(())
}

/// Mirrors the response around half the Nyquist frequency by negating every odd tap.
///
/// A lowpass with cutoff `f` becomes a highpass with cutoff `1 - f`.
pub fn mirror_response<T: Coefficient>(out: &mut [T], filter: &[T]) -> Result<(), FilterError> {
    check_length(filter.len(), out.len())?;
    for (i, (o, &h)) in out.iter_mut().zip(filter).enumerate() {
        *o = if i % 2 == 0 { h } else { -h };
    }
    Ok(())
}

/// The complement `δ - h`: passes what `filter` stops and the other way round.
///
/// `filter` must have odd length so that the impulse lands on the centre tap.
pub fn complementary_response<T: Coefficient>(
    out: &mut [T],
    filter: &[T],
) -> Result<(), FilterError> {
    check_odd(filter.len())?;
    check_length(filter.len(), out.len())?;
    for (o, &h) in out.iter_mut().zip(filter) {
        *o = -h;
    }
    out[filter.len() / 2] += T::one();
    Ok(())
}

/// Moves the passband of a lowpass to be centred on `normalized_frequency`.
///
/// Cosine modulation splits the response into two copies at `±normalized_frequency`; the taps
/// are doubled so each copy keeps the original gain.
pub fn shift_response<T: Coefficient>(
    out: &mut [T],
    filter: &[T],
    normalized_frequency: T,
) -> Result<(), FilterError> {
    check_length(filter.len(), out.len())?;
    if filter.is_empty() {
        return Ok(());
    }
    let two = T::one() + T::one();
    let centre = T::from_weight(filter.len() as u64 - 1) / two;
    let scale = T::PI() * normalized_frequency;
    for (i, (o, &h)) in out.iter_mut().zip(filter).enumerate() {
        let x = (T::from_weight(i as u64) - centre) * scale;
        *o = two * x.cos() * h;
    }
    Ok(())
}

/// Multiplier of the `2, 0, -2, 0` kernel at `distance` taps from the centre.
fn hilbert_multiplier<T: Coefficient>(distance: isize) -> T {
    let two = T::one() + T::one();
    match distance.rem_euclid(4) {
        1 => two,
        3 => -two,
        _ => T::zero_value(),
    }
}

/// Turns a halfband lowpass into a Hilbert transformer of the same, odd, length.
pub fn halfband_to_hilbert_odd<T: Coefficient>(
    out: &mut [T],
    halfband: &[T],
) -> Result<(), FilterError> {
    check_odd(halfband.len())?;
    check_length(halfband.len(), out.len())?;
    let centre = (halfband.len() / 2) as isize;
    for (i, (o, &h)) in out.iter_mut().zip(halfband).enumerate() {
        *o = h * hilbert_multiplier(i as isize - centre);
    }
    Ok(())
}

/// Turns a halfband lowpass of length `2n - 1` into an even length Hilbert transformer of
/// length `n`, keeping only the taps the odd form leaves non-zero.
///
/// `out.len()` must be even.
pub fn halfband_to_hilbert_even<T: Coefficient>(
    out: &mut [T],
    halfband: &[T],
) -> Result<(), FilterError> {
    if out.is_empty() || out.len() % 2 != 0 {
        return Err(FilterError::LengthMismatch {
            expected: halfband.len().div_ceil(2),
            actual: out.len(),
        });
    }
    check_length(out.len() * 2 - 1, halfband.len())?;
    let centre = (halfband.len() / 2) as isize;
    for (j, o) in out.iter_mut().enumerate() {
        let i = 2 * j;
        *o = halfband[i] * hilbert_multiplier(i as isize - centre);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::filter::{fir_lowpass, Window};
    use crate::kernels::sum;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mirror_alternates_signs() {
        let mut out = [0.0f32; 4];
        mirror_response(&mut out, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(out, [1.0, -2.0, 3.0, -4.0]);
    }

    #[test]
    fn complementary_of_lowpass_blocks_dc() {
        let lowpass = fir_lowpass(0.3f64, 31, Window::Hamming).unwrap();
        let mut highpass = vec![0.0; 31];
        complementary_response(&mut highpass, &lowpass).unwrap();
        assert_abs_diff_eq!(sum(&highpass), 0.0, epsilon = 1e-12);
        assert_eq!(
            complementary_response(&mut [0.0f64; 4], &[0.0; 4]).unwrap_err(),
            FilterError::EvenLength(4)
        );
    }

    #[test]
    fn shift_by_zero_doubles() {
        let mut out = [0.0f64; 3];
        shift_response(&mut out, &[1.0, 2.0, 1.0], 0.0).unwrap();
        assert_eq!(out, [2.0, 4.0, 2.0]);
    }

    #[test]
    fn shift_is_symmetric() {
        let lowpass = fir_lowpass(0.2f64, 20, Window::Hann).unwrap();
        let mut out = vec![0.0; 20];
        shift_response(&mut out, &lowpass, 0.5).unwrap();
        for (a, b) in out.iter().zip(out.iter().rev()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn hilbert_odd_kernel() {
        let halfband = [1.0f32; 9];
        let mut out = [0.0f32; 9];
        halfband_to_hilbert_odd(&mut out, &halfband).unwrap();
        assert_eq!(out, [0.0, 2.0, 0.0, -2.0, 0.0, 2.0, 0.0, -2.0, 0.0]);
    }

    #[test]
    fn hilbert_even_keeps_every_other_tap() {
        let halfband = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let mut out = [0.0f32; 4];
        halfband_to_hilbert_even(&mut out, &halfband).unwrap();
        // centre 3: distances -3, -1, 1, 3
        assert_eq!(out, [2.0, -6.0, 10.0, -14.0]);

        assert_eq!(
            halfband_to_hilbert_even(&mut [0.0f32; 4], &[0.0; 9]).unwrap_err(),
            FilterError::LengthMismatch {
                expected: 7,
                actual: 9
            }
        );
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            mirror_response(&mut [0.0f64; 2], &[1.0; 3]).unwrap_err(),
            FilterError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }
}
