//! Numeric constants appearing in symbolic expressions.

use crate::primitive::{float, int, rat};
use rug::{ops::Pow, Float, Integer, Rational};
use std::{fmt, ops::{Add, Mul, Neg}};

/// Upper bound on the estimated size, in bits, of a power folded by [`Number::checked_pow`].
pub const MAX_POW_BITS: u64 = 1 << 16;

/// Returns true if `base^exponent` is small enough to compute exactly: `base` is 0, 1 or -1, or
/// the estimated size of the result is at most [`MAX_POW_BITS`] bits.
pub fn pow_fits(base: &Rational, exponent: u32) -> bool {
    let bits = base.numer().significant_bits().max(base.denom().significant_bits());
    bits <= 1 || u64::from(exponent) * u64::from(bits) <= MAX_POW_BITS
}

/// A numeric constant.
///
/// Exact values are kept canonical: a [`Number::Rational`] always has a denominator greater
/// than one, otherwise it is stored as a [`Number::Integer`]. Any arithmetic involving a
/// [`Number::Float`] produces a [`Number::Float`], since the result is no longer exact.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// An exact integer, such as `2` or `-144`.
    Integer(Integer),

    /// An exact, reduced fraction with a denominator greater than one, such as `1/2`.
    Rational(Rational),

    /// An inexact floating-point value, such as `0.5`.
    Float(Float),
}

impl Number {
    /// Creates a canonical exact number from the given [`Rational`].
    pub fn from_rational(r: Rational) -> Self {
        if *r.denom() == 1 {
            Self::Integer(r.into_numer_denom().0)
        } else {
            Self::Rational(r)
        }
    }

    /// The exact number zero.
    pub fn zero() -> Self {
        Self::Integer(int(0))
    }

    /// The exact number one.
    pub fn one() -> Self {
        Self::Integer(int(1))
    }

    /// Returns true if the number is exact, i.e. not a [`Number::Float`].
    pub fn is_exact(&self) -> bool {
        !matches!(self, Self::Float(_))
    }

    /// Returns the value as a [`Rational`], or [`None`] if the number is inexact.
    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            Self::Integer(n) => Some(rat(n)),
            Self::Rational(r) => Some(r.clone()),
            Self::Float(_) => None,
        }
    }

    /// Returns true if the number is exactly zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Integer(n) if n.is_zero())
    }

    /// Returns true if the number is exactly one.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Integer(n) if *n == 1)
    }

    /// Converts the number into a [`Float`].
    fn to_float(&self) -> Float {
        match self {
            Self::Integer(n) => float(n),
            Self::Rational(r) => float(r),
            Self::Float(f) => f.clone(),
        }
    }

    /// Raises an exact number to an integer power. Returns [`None`] if the result would require
    /// dividing by zero, if the exponent does not fit in an `i32`, if either operand is inexact,
    /// or if the result would need more than [`MAX_POW_BITS`] bits to store.
    pub fn checked_pow(&self, exponent: &Integer) -> Option<Self> {
        let base = self.as_rational()?;
        let exponent = exponent.to_i32()?;
        if exponent < 0 && base == 0 {
            return None;
        }

        if !pow_fits(&base, exponent.unsigned_abs()) {
            return None;
        }

        if base.numer().significant_bits() <= 1 && *base.denom() == 1 {
            // 0, 1 and -1
            let result = if base == 0 && exponent != 0 {
                0
            } else if base < 0 && exponent % 2 != 0 {
                -1
            } else {
                1
            };
            return Some(Self::Integer(int(result)));
        }
        Some(Self::from_rational(base.pow(exponent)))
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Self) -> Self::Output {
        match (self.as_rational(), rhs.as_rational()) {
            (Some(lhs), Some(rhs)) => Number::from_rational(lhs + rhs),
            _ => Number::Float(self.to_float() + rhs.to_float()),
        }
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self.as_rational(), rhs.as_rational()) {
            (Some(lhs), Some(rhs)) => Number::from_rational(lhs * rhs),
            _ => Number::Float(self.to_float() * rhs.to_float()),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        match self {
            Self::Integer(n) => Self::Integer(-n),
            Self::Rational(r) => Self::Rational(-r),
            Self::Float(f) => Self::Float(-f),
        }
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Self::Integer(n)
    }
}

impl From<Rational> for Number {
    fn from(r: Rational) -> Self {
        Self::from_rational(r)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Rational(r) => write!(f, "{}", r),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
        }
    }
}
