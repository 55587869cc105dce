/// Scalar used by the filter design helpers when no explicit type is requested.
#[cfg(not(feature = "64bit"))]
pub type Float = f32;
/// Scalar used by the filter design helpers when no explicit type is requested.
#[cfg(feature = "64bit")]
pub type Float = f64;

/// Build a `NonZero` integer from a literal, failing at compile time on zero.
///
/// ```rust
/// use multirate::nz;
/// use multirate::interpolation::SampleRates;
///
/// let rates = SampleRates::new(nz!(44_100), nz!(48_000));
/// assert_eq!(rates.ratio(), multirate::Rational::new(147, 160));
/// ```
#[macro_export]
macro_rules! nz {
    ($n:literal) => {
        const { ::core::num::NonZero::new($n).unwrap() }
    };
}

/// Compile-time check that an error type can travel across threads and be cloned.
macro_rules! assert_error_traits {
    ($to_test:path) => {
        const _: () = {
            $crate::common::check_error_traits::<$to_test>();
        };
    };
}
pub(crate) use assert_error_traits;

pub(crate) const fn check_error_traits<T>()
where
    T: std::error::Error + Send + Sync + Clone + PartialEq + 'static,
{
}
