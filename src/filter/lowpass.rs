use super::{Coefficient, FilterError, Window};
use crate::kernels::sum;
use crate::signal::TimeSignal;

/// Windowed-sinc lowpass with unity DC gain, written to `coefficients`.
///
/// `cutoff_norm` is relative to the Nyquist frequency. The sinc is centred between the first and
/// the last tap, so the result is symmetric for any length.
pub fn fir_lowpass_win<T: Coefficient>(
    coefficients: &mut [T],
    cutoff_norm: T,
    window: Window,
) -> Result<(), FilterError> {
    if coefficients.is_empty() {
        return Err(FilterError::EmptyFilter);
    }
    window.fill(coefficients);
    apply_sinc(coefficients, cutoff_norm)
}

/// Same as [`fir_lowpass_win`], tapering the sinc with the samples of `window` instead of a
/// built-in window function.
pub fn fir_lowpass_with_window<T: Coefficient>(
    coefficients: &mut [T],
    cutoff_norm: T,
    window: &[T],
) -> Result<(), FilterError> {
    if coefficients.is_empty() {
        return Err(FilterError::EmptyFilter);
    }
    if window.len() != coefficients.len() {
        return Err(FilterError::LengthMismatch {
            expected: coefficients.len(),
            actual: window.len(),
        });
    }
    coefficients.copy_from_slice(window);
    apply_sinc(coefficients, cutoff_norm)
}

/// Multiplies the window held in `coefficients` by the sinc and normalizes to unity DC gain.
fn apply_sinc<T: Coefficient>(coefficients: &mut [T], cutoff_norm: T) -> Result<(), FilterError> {
    let centre = T::from_weight(coefficients.len() as u64 - 1) / T::from_weight(2);
    let scale = cutoff_norm * T::PI();
    for (i, c) in coefficients.iter_mut().enumerate() {
        let x = (T::from_weight(i as u64) - centre) * scale;
        let sinc = if x == T::zero_value() {
            T::one()
        } else {
            x.sin() / x
        };
        *c = *c * sinc;
    }

    let gain = sum(coefficients);
    if gain == T::zero_value() || !gain.is_finite() {
        return Err(FilterError::ZeroGain);
    }
    for c in coefficients.iter_mut() {
        *c = *c / gain;
    }
    Ok(())
}

/// Allocating form of [`fir_lowpass_win`] with `num_taps` taps.
pub fn fir_lowpass<T: Coefficient>(
    cutoff_norm: T,
    num_taps: usize,
    window: Window,
) -> Result<TimeSignal<T>, FilterError> {
    if num_taps == 0 {
        return Err(FilterError::EmptyFilter);
    }
    let mut taps = TimeSignal::zeros(num_taps);
    fir_lowpass_win(&mut taps, cutoff_norm, window)?;
    Ok(taps)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    fn unit_dc_gain_and_symmetric(
        #[values(Window::Hamming, Window::Blackman, Window::Kaiser(5.0))] window: Window,
        #[values(7, 8, 63)] num_taps: usize,
        #[values(0.1, 0.5, 0.9)] cutoff: f64,
    ) {
        let taps = fir_lowpass(cutoff, num_taps, window).unwrap();
        assert_abs_diff_eq!(sum(&taps), 1.0, epsilon = 1e-12);
        for (a, b) in taps.iter().zip(taps.iter().rev()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn full_band_is_an_impulse() {
        // sin(πk) vanishes at every integer offset from the centre
        let taps = fir_lowpass(1.0f64, 5, Window::Rectangular).unwrap();
        for (i, &tap) in taps.iter().enumerate() {
            let expected = if i == 2 { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(tap, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn all_zero_window_has_no_gain() {
        // a two tap Hann window is [0, 0]
        assert_eq!(
            fir_lowpass(0.5f64, 2, Window::Hann).unwrap_err(),
            FilterError::ZeroGain
        );
        assert_eq!(
            fir_lowpass_with_window(&mut [0.0f32; 3], 0.5, &[0.0; 3]).unwrap_err(),
            FilterError::ZeroGain
        );
    }

    #[test]
    fn custom_window_matches_built_in() {
        let mut window = [0.0f64; 15];
        Window::Blackman.fill(&mut window);
        let mut custom = [0.0f64; 15];
        fir_lowpass_with_window(&mut custom, 0.4, &window).unwrap();
        let built_in = fir_lowpass(0.4f64, 15, Window::Blackman).unwrap();
        assert_eq!(&custom[..], built_in.as_slice());
    }

    #[test]
    fn custom_window_length_mismatch() {
        assert_eq!(
            fir_lowpass_with_window(&mut [0.0f32; 4], 0.5, &[1.0; 5]).unwrap_err(),
            FilterError::LengthMismatch {
                expected: 4,
                actual: 5
            }
        );
        assert_eq!(
            fir_lowpass_with_window(&mut [0.0f32; 0], 0.5, &[]).unwrap_err(),
            FilterError::EmptyFilter
        );
    }

    #[test]
    fn empty() {
        assert_eq!(
            fir_lowpass::<f32>(0.5, 0, Window::Hann).unwrap_err(),
            FilterError::EmptyFilter
        );
    }
}
