//! Exact fractions for sample-rate ratios and sample positions.
//!
//! [`Rational`] wraps [`num_rational::Ratio`] and adds what the resampler needs on top of it:
//! mathematical `floor` and `frac` (both rounding toward negative infinity), comparisons against
//! plain integers and mixed integer arithmetic.
//!
//! # Overflow
//!
//! The operators are exact but unchecked: numerator and denominator must stay inside the integer
//! width. For the resampler with `i64` that means `|sample index| × phase count × rate terms`
//! must stay below `2^63`, which holds for any practical stream (hours of 384 kHz audio with
//! thousands of phases). Use the `checked_*` methods where inputs are not under your control.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, ToPrimitive};

/// An exact fraction kept in lowest terms with a positive denominator.
#[derive(Clone, Copy, Debug)]
pub struct Rational<I>(Ratio<I>);

impl<I> Rational<I>
where
    I: Clone + Integer,
{
    /// Creates a reduced fraction `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    #[inline]
    pub fn new(numer: I, denom: I) -> Self {
        Rational(Ratio::new(numer, denom))
    }

    /// The fraction `value / 1`.
    #[inline]
    pub fn from_integer(value: I) -> Self {
        Rational(Ratio::from_integer(value))
    }

    /// Numerator; carries the sign.
    #[inline]
    pub fn numer(&self) -> I {
        self.0.numer().clone()
    }

    /// Denominator; always positive.
    #[inline]
    pub fn denom(&self) -> I {
        self.0.denom().clone()
    }

    /// Returns `(numerator, denominator)`.
    #[inline]
    pub fn into_raw(self) -> (I, I) {
        self.0.into_raw()
    }

    /// The underlying [`Ratio`].
    #[inline]
    pub fn into_ratio(self) -> Ratio<I> {
        self.0
    }

    /// Greatest integer less than or equal to the value.
    #[inline]
    pub fn floor(&self) -> I {
        self.0.numer().div_floor(self.0.denom())
    }

    /// Smallest integer greater than or equal to the value.
    #[inline]
    pub fn ceil(&self) -> I {
        if self.0.is_integer() {
            self.floor()
        } else {
            self.floor() + I::one()
        }
    }

    /// `self - self.floor()`, always in `[0, 1)`.
    ///
    /// Unlike [`Ratio::fract`] this does not truncate toward zero, so `frac(-1/4) == 3/4`.
    #[inline]
    pub fn frac(&self) -> Self {
        let denom = self.denom();
        Rational(Ratio::new(self.0.numer().mod_floor(&denom), denom))
    }

    /// Whether the denominator is one.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Addition that returns `None` instead of overflowing.
    #[inline]
    pub fn checked_add(&self, other: &Self) -> Option<Self>
    where
        I: CheckedAdd + CheckedMul,
    {
        self.0.checked_add(&other.0).map(Rational)
    }

    /// Subtraction that returns `None` instead of overflowing.
    #[inline]
    pub fn checked_sub(&self, other: &Self) -> Option<Self>
    where
        I: CheckedSub + CheckedMul,
    {
        self.0.checked_sub(&other.0).map(Rational)
    }

    /// Multiplication that returns `None` instead of overflowing.
    #[inline]
    pub fn checked_mul(&self, other: &Self) -> Option<Self>
    where
        I: CheckedMul,
    {
        self.0.checked_mul(&other.0).map(Rational)
    }

    /// Nearest `f64`, computed from the two integer parts.
    #[inline]
    pub fn to_f64(&self) -> f64
    where
        I: ToPrimitive,
    {
        let numer = self.0.numer().to_f64().unwrap_or(f64::NAN);
        let denom = self.0.denom().to_f64().unwrap_or(f64::NAN);
        numer / denom
    }
}

impl<I> Default for Rational<I>
where
    I: Clone + Integer,
{
    fn default() -> Self {
        Rational(Ratio::from_integer(I::zero()))
    }
}

impl<I> From<I> for Rational<I>
where
    I: Clone + Integer,
{
    fn from(value: I) -> Self {
        Rational::from_integer(value)
    }
}

impl<I> From<Ratio<I>> for Rational<I>
where
    I: Clone + Integer,
{
    fn from(ratio: Ratio<I>) -> Self {
        // `Ratio::new_raw` can produce unreduced values.
        let (numer, denom) = ratio.into_raw();
        Rational::new(numer, denom)
    }
}

impl<I> From<Rational<I>> for Ratio<I> {
    fn from(value: Rational<I>) -> Self {
        value.0
    }
}

impl<I> fmt::Display for Rational<I>
where
    I: Clone + Integer + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0.numer(), self.0.denom())
    }
}

impl<I> PartialEq for Rational<I>
where
    I: Clone + Integer,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<I> Eq for Rational<I> where I: Clone + Integer {}

impl<I> PartialEq<I> for Rational<I>
where
    I: Clone + Integer,
{
    fn eq(&self, other: &I) -> bool {
        self.0.is_integer() && self.0.numer() == other
    }
}

impl<I> PartialOrd for Rational<I>
where
    I: Clone + Integer,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I> Ord for Rational<I>
where
    I: Clone + Integer,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<I> PartialOrd<I> for Rational<I>
where
    I: Clone + Integer,
{
    fn partial_cmp(&self, other: &I) -> Option<Ordering> {
        // The denominator is positive, so the comparison survives cross-multiplication.
        let scaled = other.clone() * self.denom();
        Some(self.0.numer().cmp(&scaled))
    }
}

impl<I> Hash for Rational<I>
where
    I: Clone + Integer + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.numer().hash(state);
        self.0.denom().hash(state);
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl<I> $imp for Rational<I>
        where
            I: Clone + Integer,
        {
            type Output = Rational<I>;

            #[inline]
            fn $method(self, rhs: Rational<I>) -> Rational<I> {
                Rational($imp::$method(self.0, rhs.0))
            }
        }

        impl<I> $imp<I> for Rational<I>
        where
            I: Clone + Integer,
        {
            type Output = Rational<I>;

            #[inline]
            fn $method(self, rhs: I) -> Rational<I> {
                Rational($imp::$method(self.0, Ratio::from_integer(rhs)))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl<I> AddAssign for Rational<I>
where
    I: Clone + Integer,
{
    #[inline]
    fn add_assign(&mut self, rhs: Rational<I>) {
        self.0 = self.0.clone() + rhs.0;
    }
}

impl<I> AddAssign<I> for Rational<I>
where
    I: Clone + Integer,
{
    #[inline]
    fn add_assign(&mut self, rhs: I) {
        self.0 = self.0.clone() + Ratio::from_integer(rhs);
    }
}

impl<I> SubAssign for Rational<I>
where
    I: Clone + Integer,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Rational<I>) {
        self.0 = self.0.clone() - rhs.0;
    }
}

impl<I> Neg for Rational<I>
where
    I: Clone + Integer + Neg<Output = I>,
{
    type Output = Rational<I>;

    #[inline]
    fn neg(self) -> Rational<I> {
        Rational(-self.0)
    }
}

#[cfg(feature = "serde")]
impl<I> serde::Serialize for Rational<I>
where
    I: Clone + Integer + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.0.numer(), self.0.denom()).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, I> serde::Deserialize<'de> for Rational<I>
where
    I: Clone + Integer + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (numer, denom) = <(I, I)>::deserialize(deserializer)?;
        if num_traits::Zero::is_zero(&denom) {
            return Err(serde::de::Error::custom("rational with a zero denominator"));
        }
        Ok(Rational::new(numer, denom))
    }
}

#[cfg(test)]
mod test {
    use super::Rational;
    use num_integer::Integer;
    use quickcheck::{quickcheck, TestResult};

    #[test]
    fn reduces_and_normalizes_sign() {
        let r = Rational::new(6i64, -4);
        assert_eq!(r.into_raw(), (-3, 2));
        assert_eq!(Rational::new(0i64, -7).into_raw(), (0, 1));
    }

    #[test]
    #[should_panic]
    fn zero_denominator() {
        let _ = Rational::new(1i64, 0);
    }

    #[test]
    fn floor_and_frac_of_negative_values() {
        let r = Rational::new(-1i64, 4);
        assert_eq!(r.floor(), -1);
        assert_eq!(r.frac(), Rational::new(3, 4));
        assert_eq!(r.ceil(), 0);

        let r = Rational::new(-8i64, 4);
        assert_eq!(r.floor(), -2);
        assert_eq!(r.frac(), 0);
        assert_eq!(r.ceil(), -2);
    }

    #[test]
    fn compares_with_integers() {
        let r = Rational::new(7i64, 2);
        assert!(r > 3);
        assert!(r < 4);
        assert!(r <= 4);
        assert!(r != 3);
        assert!(Rational::new(-1i64, 3) < 0);
        assert!(Rational::new(9i64, 3) == 3);
        assert!(Rational::<i64>::default() <= 0);
    }

    #[test]
    fn mixed_integer_arithmetic() {
        let mut r = Rational::new(1i64, 3);
        r += 1;
        assert_eq!(r, Rational::new(4, 3));
        assert_eq!(r * 3, 4);
        assert_eq!(r / 2, Rational::new(2, 3));
        assert_eq!(r - 2, Rational::new(-2, 3));
        assert_eq!(-r, Rational::new(-4, 3));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let big = Rational::new(i64::MAX, 1);
        assert_eq!(big.checked_add(&Rational::new(1, 1)), None);
        assert_eq!(big.checked_mul(&Rational::new(2, 1)), None);
        assert_eq!(
            big.checked_sub(&Rational::new(1, 1)),
            Some(Rational::new(i64::MAX - 1, 1))
        );
    }

    #[test]
    fn displays_as_fraction() {
        assert_eq!(Rational::new(147i64, 160).to_string(), "147/160");
        assert!((Rational::new(1i64, 4).to_f64() - 0.25).abs() < f64::EPSILON);
    }

    quickcheck! {
        fn sum_is_exact_and_reduced(a: i32, b: i32, c: i32, d: i32) -> TestResult {
            if b == 0 || d == 0 {
                return TestResult::discard();
            }
            let (a, b, c, d) = (a as i64, b as i64, c as i64, d as i64);
            let sum = Rational::new(a, b) + Rational::new(c, d);
            let (numer, denom) = sum.into_raw();

            // numer / denom == (a*d + c*b) / (b*d)
            let lhs = numer as i128 * (b as i128 * d as i128);
            let rhs = (a as i128 * d as i128 + c as i128 * b as i128) * denom as i128;
            TestResult::from_bool(lhs == rhs && denom > 0 && numer.gcd(&denom) == 1)
        }

        fn floor_plus_frac_is_identity(numer: i32, denom: i32) -> TestResult {
            if denom == 0 {
                return TestResult::discard();
            }
            let x = Rational::new(numer as i64, denom as i64);
            let frac = x.frac();
            TestResult::from_bool(
                Rational::from_integer(x.floor()) + frac == x && frac >= 0 && frac < 1,
            )
        }

        fn ceil_bounds_value(numer: i32, denom: i32) -> TestResult {
            if denom == 0 {
                return TestResult::discard();
            }
            let x = Rational::new(numer as i64, denom as i64);
            let ceil = x.ceil();
            TestResult::from_bool(x <= ceil && x > ceil - 1)
        }
    }
}
