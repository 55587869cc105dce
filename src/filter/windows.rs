//! Symmetric window functions.
//!
//! Every function fills the whole slice. A window of length one is `[1]`.

use std::f64::consts::PI;

use super::{cast, Coefficient};

/// Window applied to a truncated sinc when designing FIR filters.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Window {
    /// No tapering: narrowest main lobe, ~21 dB stopband attenuation.
    Rectangular,

    /// Hamming window: ~53 dB stopband attenuation.
    #[default]
    Hamming,

    /// Hann window: ~44 dB stopband attenuation, fast rolloff.
    Hann,

    /// Blackman window: ~75 dB stopband attenuation.
    Blackman,

    /// Blackman-Harris window: ~92 dB stopband attenuation with a wider transition band.
    BlackmanHarris,

    /// Flat top window: very flat passband, used where amplitude accuracy matters most.
    Flattop,

    /// Kaiser window with shape parameter `beta`.
    ///
    /// Larger values trade transition width for stopband attenuation; `beta = 0` is rectangular.
    Kaiser(f64),
}

impl Window {
    /// Fills `out` with this window.
    pub fn fill<T: Coefficient>(&self, out: &mut [T]) {
        match *self {
            Window::Rectangular => rectangular(out),
            Window::Hamming => hamming(out),
            Window::Hann => hann(out),
            Window::Blackman => blackman(out),
            Window::BlackmanHarris => blackman_harris(out),
            Window::Flattop => flattop(out),
            Window::Kaiser(beta) => kaiser(out, beta),
        }
    }
}

/// Fills `out` with `f(n / (len - 1))` for `n` in `0..len`.
fn symmetric<T: Coefficient>(out: &mut [T], f: impl Fn(f64) -> f64) {
    let last = match out.len() {
        0 => return,
        1 => {
            out[0] = T::one();
            return;
        }
        len => (len - 1) as f64,
    };
    for (n, w) in out.iter_mut().enumerate() {
        *w = cast(f(n as f64 / last));
    }
}

/// Sum of cosines `a[0] - a[1] cos(2πx) + a[2] cos(4πx) - ...`.
fn cosine_sum<T: Coefficient>(out: &mut [T], coefficients: &[f64]) {
    symmetric(out, |x| {
        coefficients
            .iter()
            .enumerate()
            .map(|(k, a)| {
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                sign * a * (2.0 * PI * k as f64 * x).cos()
            })
            .sum()
    });
}

/// All ones.
pub fn rectangular<T: Coefficient>(out: &mut [T]) {
    out.fill(T::one());
}

/// Hamming window.
pub fn hamming<T: Coefficient>(out: &mut [T]) {
    cosine_sum(out, &[0.54, 0.46]);
}

/// Hann window.
pub fn hann<T: Coefficient>(out: &mut [T]) {
    cosine_sum(out, &[0.5, 0.5]);
}

/// Blackman window.
pub fn blackman<T: Coefficient>(out: &mut [T]) {
    cosine_sum(out, &[0.42, 0.5, 0.08]);
}

/// Four-term Blackman-Harris window.
pub fn blackman_harris<T: Coefficient>(out: &mut [T]) {
    cosine_sum(out, &[0.35875, 0.48829, 0.14128, 0.01168]);
}

/// Flat top window.
pub fn flattop<T: Coefficient>(out: &mut [T]) {
    cosine_sum(
        out,
        &[0.21557895, 0.41663158, 0.277263158, 0.083578947, 0.006947368],
    );
}

/// Kaiser window with shape parameter `beta`.
pub fn kaiser<T: Coefficient>(out: &mut [T], beta: f64) {
    let norm = bessel_i0(beta);
    symmetric(out, |x| {
        let t = 2.0 * x - 1.0;
        bessel_i0(beta * (1.0 - t * t).max(0.0).sqrt()) / norm
    });
}

/// Zeroth-order modified Bessel function of the first kind, by its power series.
fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..=50 {
        let ratio = half / k as f64;
        term *= ratio * ratio;
        sum += term;
        if term < 1e-20 * sum {
            break;
        }
    }
    sum
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    fn symmetric_and_peaks_at_centre(
        #[values(
            Window::Rectangular,
            Window::Hamming,
            Window::Hann,
            Window::Blackman,
            Window::BlackmanHarris,
            Window::Flattop,
            Window::Kaiser(6.0)
        )]
        window: Window,
        #[values(1, 2, 9, 32)] len: usize,
    ) {
        let mut out = vec![0.0f64; len];
        window.fill(&mut out);
        for (a, b) in out.iter().zip(out.iter().rev()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
        if len % 2 == 1 {
            assert_abs_diff_eq!(out[len / 2], 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn hann_endpoints_are_zero() {
        let mut out = [1.0f32; 5];
        hann(&mut out);
        assert_abs_diff_eq!(out[0], 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(out[2], 1.0, epsilon = 1e-7);
        assert_abs_diff_eq!(out[4], 0.0, epsilon = 1e-7);
    }

    #[test]
    fn hamming_endpoints() {
        let mut out = [0.0f64; 3];
        hamming(&mut out);
        assert_abs_diff_eq!(out[0], 0.08, epsilon = 1e-12);
    }

    #[test]
    fn kaiser_zero_beta_is_rectangular() {
        let mut out = [0.0f64; 6];
        kaiser(&mut out, 0.0);
        assert_eq!(out, [1.0; 6]);
    }

    #[test]
    fn bessel_reference_values() {
        assert_abs_diff_eq!(bessel_i0(0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bessel_i0(1.0), 1.266065877752008, epsilon = 1e-10);
    }
}
