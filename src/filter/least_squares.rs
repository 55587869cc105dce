//! Linear-phase FIR design by weighted least squares.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};

use super::{cast, Coefficient, FilterError};

/// Singular values below this are treated as zero by the solver.
const SINGULAR_EPS: f64 = 1e-12;

/// Designs a symmetric, odd length filter whose amplitude response best matches `response` in the
/// weighted least squares sense.
///
/// `response` and `weight` are evaluated on `grid_size` frequencies evenly spaced over `[0, 1]`,
/// relative to the Nyquist frequency. Frequencies with zero weight, such as transition bands, do
/// not constrain the result; negative weights count as zero. A `grid_size` of zero picks four
/// points per free coefficient, and the grid never gets smaller than the number of free
/// coefficients.
///
/// ```rust
/// use multirate::filter::fir_least_squares;
///
/// let mut taps = [0.0f64; 31];
/// fir_least_squares(
///     &mut taps,
///     |f| if f < 0.25 { 1.0 } else { 0.0 },
///     |f| if (0.2..0.3).contains(&f) { 0.0 } else { 1.0 },
///     0,
/// )?;
/// assert_eq!(taps[0], taps[30]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn fir_least_squares<T: Coefficient>(
    coefficients: &mut [T],
    response: impl Fn(f64) -> f64,
    weight: impl Fn(f64) -> f64,
    grid_size: usize,
) -> Result<(), FilterError> {
    if coefficients.is_empty() {
        return Err(FilterError::EmptyFilter);
    }
    if coefficients.len() % 2 == 0 {
        return Err(FilterError::EvenLength(coefficients.len()));
    }

    // The centre tap and the taps right of it determine the filter.
    let free = coefficients.len().div_ceil(2);
    let grid_size = match grid_size {
        0 => 4 * free,
        n => n.max(free),
    }
    .max(2);

    let frequencies: Vec<f64> = (0..grid_size)
        .map(|i| i as f64 / (grid_size - 1) as f64)
        .collect();
    let scales: Vec<f64> = frequencies
        .iter()
        .map(|&f| weight(f).max(0.0).sqrt())
        .collect();

    // Amplitude response of the half filter: h[0] + 2 Σ h[k] cos(πfk).
    let system = DMatrix::from_fn(grid_size, free, |row, col| {
        let basis = match col {
            0 => 1.0,
            k => 2.0 * (PI * frequencies[row] * k as f64).cos(),
        };
        scales[row] * basis
    });
    let target = DVector::from_fn(grid_size, |row, _| {
        scales[row] * response(frequencies[row])
    });

    let half = system
        .svd(true, true)
        .solve(&target, SINGULAR_EPS)
        .map_err(FilterError::LeastSquares)?;

    let centre = free - 1;
    for (k, &h) in half.iter().enumerate() {
        coefficients[centre - k] = cast(h);
        coefficients[centre + k] = cast(h);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        num_taps = coefficients.len(),
        grid_size,
        "designed least squares filter"
    );
    Ok(())
}
