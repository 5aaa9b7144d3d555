//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision used for inexact (floating-point) values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
///
/// ```
/// use cas_series::primitive::rat;
///
/// assert_eq!(rat((2, 4)), rat((1, 2)));
/// assert_eq!(rat(3), 3);
/// ```
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Parses an [`Integer`] from a string of decimal digits.
pub fn int_from_str(s: &str) -> Option<Integer> {
    s.parse().ok()
}

/// Parses a [`Float`] from a string slice.
pub fn float_from_str(s: &str) -> Option<Float> {
    Float::parse(s).ok().map(float)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integer() {
        assert_eq!(int_from_str("1072"), Some(int(1072)));
        assert_eq!(int_from_str("123456789012345678901234567890").map(|n| n.significant_bits()), Some(97));
        assert_eq!(int_from_str("1.5"), None);
    }

    #[test]
    fn parse_float() {
        let half = float_from_str("0.5").unwrap();
        assert_eq!(half, 0.5);
        assert_eq!(half.prec(), PRECISION);
    }

    #[test]
    fn rationals_are_reduced() {
        let r = rat((6, -4));
        assert_eq!(*r.numer(), -3);
        assert_eq!(*r.denom(), 2);
    }
}
