//! Truncated power series with exact rational coefficients.
//!
//! A [`RatSeries`] of length `n` stores the coefficients of degrees `0..n` of a power series
//! about the origin; everything of degree `n` and above is unknown. All operations are exact.
//!
//! The transcendental functions use the logarithmic-derivative recurrences: if `c = f(a)` and
//! `c' = a' g` for some series `g`, then
//!
//! ```text
//! c[k] = (1/k) Σ_{j=1}^{k} j a[j] g[k-j]
//! ```
//!
//! # Preconditions
//!
//! Each function below is only defined for arguments with a specific constant term, documented
//! on the function. These are **not** checked in release builds; callers must verify them first.
//! The composer in [`super::compose`] does exactly that.

use crate::primitive::{int, rat};
use rug::Rational;

/// A truncated power series with exact rational coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatSeries {
    coeffs: Vec<Rational>,
}

/// Returns `n` as a [`Rational`].
fn nat(n: usize) -> Rational {
    rat(int(n))
}

/// Computes `(1/k) Σ_{j=1}^{k} j a[j] g[k-j]`, the `k`-th coefficient of the integral of `a' g`.
fn chain(a: &[Rational], g: &[Rational], k: usize) -> Rational {
    let mut sum = rat(0);
    for j in 1..=k {
        sum += Rational::from(&a[j] * &g[k - j]) * nat(j);
    }
    sum / nat(k)
}

/// Computes `Σ_{j=lo}^{hi} a[j] b[k-j]`.
fn convolve(a: &[Rational], b: &[Rational], k: usize, lo: usize, hi: usize) -> Rational {
    let mut sum = rat(0);
    for j in lo..=hi {
        sum += Rational::from(&a[j] * &b[k - j]);
    }
    sum
}

impl RatSeries {
    /// Creates a series from its coefficients, lowest degree first.
    pub fn from_coeffs(coeffs: Vec<Rational>) -> Self {
        Self { coeffs }
    }

    /// The zero series of the given length.
    pub fn zero(len: usize) -> Self {
        Self { coeffs: vec![rat(0); len] }
    }

    /// The constant series `c` of the given length.
    pub fn constant(c: Rational, len: usize) -> Self {
        let mut series = Self::zero(len);
        if let Some(first) = series.coeffs.first_mut() {
            *first = c;
        }
        series
    }

    /// The constant series `1` of the given length.
    pub fn one(len: usize) -> Self {
        Self::constant(rat(1), len)
    }

    /// The series of the variable itself, `x`, of the given length.
    pub fn identity(len: usize) -> Self {
        let mut series = Self::zero(len);
        if let Some(second) = series.coeffs.get_mut(1) {
            *second = rat(1);
        }
        series
    }

    /// Returns the number of known coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns true if no coefficient is known.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the known coefficients, lowest degree first.
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// Returns the coefficient of degree `n`, or zero if `n` is beyond the known coefficients.
    pub fn coeff(&self, n: usize) -> Rational {
        self.coeffs.get(n).cloned().unwrap_or_default()
    }

    /// Returns the coefficient of degree zero.
    pub fn constant_term(&self) -> Rational {
        self.coeff(0)
    }

    /// Cuts the series down to (or pads it with zeros up to) exactly `len` coefficients.
    pub fn truncate(mut self, len: usize) -> Self {
        self.coeffs.resize(len, rat(0));
        self
    }

    /// Coefficient-wise sum. The result is as long as the shorter operand.
    pub fn add(&self, other: &Self) -> Self {
        let coeffs = self.coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(a, b)| Rational::from(a + b))
            .collect();
        Self { coeffs }
    }

    /// Multiplies every coefficient by `c`.
    pub fn scale(&self, c: &Rational) -> Self {
        let coeffs = self.coeffs.iter().map(|a| Rational::from(a * c)).collect();
        Self { coeffs }
    }

    /// Divides every coefficient by `c`.
    ///
    /// **Precondition:** `c` is nonzero.
    pub fn div_scalar(&self, c: &Rational) -> Self {
        debug_assert!(*c != 0, "division of a series by zero");
        let coeffs = self.coeffs.iter().map(|a| Rational::from(a / c)).collect();
        Self { coeffs }
    }

    /// Product of two series, truncated to `len` coefficients. The result is never longer than
    /// either operand.
    pub fn mul_trunc(&self, other: &Self, len: usize) -> Self {
        let n = len.min(self.len()).min(other.len());
        let coeffs = (0..n)
            .map(|k| convolve(&self.coeffs, &other.coeffs, k, 0, k))
            .collect();
        Self { coeffs }
    }

    /// Raises the series to the `exp`-th power by repeated squaring, truncating every
    /// intermediate product to `len` coefficients.
    pub fn pow(&self, mut exp: u32, len: usize) -> Self {
        let len = len.min(self.len());
        let mut result = Self::one(len);
        let mut base = self.clone().truncate(len);
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul_trunc(&base, len);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul_trunc(&base, len);
            }
        }
        result
    }

    /// Multiplicative inverse, truncated to `len` coefficients.
    ///
    /// **Precondition:** the constant term is nonzero.
    pub fn inv(&self, len: usize) -> Self {
        let a = &self.coeffs;
        let n = len.min(a.len());
        debug_assert!(n == 0 || a[0] != 0, "inverse of a series with zero constant term");

        let mut c = Vec::with_capacity(n);
        if n == 0 {
            return Self { coeffs: c };
        }
        let inv_a0 = a[0].clone().recip();
        c.push(inv_a0.clone());
        for k in 1..n {
            let sum = convolve(a, &c, k, 1, k);
            c.push(-(sum * &inv_a0));
        }
        Self { coeffs: c }
    }

    /// `exp(a)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn exp(&self) -> Self {
        let a = &self.coeffs;
        debug_assert!(a.first().map_or(true, |a0| *a0 == 0), "exp requires a zero constant term");

        let mut c: Vec<Rational> = Vec::with_capacity(a.len());
        for k in 0..a.len() {
            let ck = if k == 0 { rat(1) } else { chain(a, &c, k) };
            c.push(ck);
        }
        Self { coeffs: c }
    }

    /// `log(a)`.
    ///
    /// **Precondition:** the constant term is one.
    pub fn log(&self) -> Self {
        let a = &self.coeffs;
        debug_assert!(a.first().map_or(true, |a0| *a0 == 1), "log requires a unit constant term");

        // c' = a' / a, with a[0] = 1
        let mut c: Vec<Rational> = Vec::with_capacity(a.len());
        for k in 0..a.len() {
            if k == 0 {
                c.push(rat(0));
                continue;
            }
            let mut sum = rat(0);
            for j in 1..k {
                sum += Rational::from(&c[j] * &a[k - j]) * nat(j);
            }
            c.push(a[k].clone() - sum / nat(k));
        }
        Self { coeffs: c }
    }

    /// `sqrt(a)`, the branch with constant term one.
    ///
    /// **Precondition:** the constant term is one.
    pub fn sqrt(&self) -> Self {
        let a = &self.coeffs;
        debug_assert!(a.first().map_or(true, |a0| *a0 == 1), "sqrt requires a unit constant term");

        let mut c: Vec<Rational> = Vec::with_capacity(a.len());
        for k in 0..a.len() {
            if k == 0 {
                c.push(rat(1));
                continue;
            }
            let sum = convolve(&c, &c, k, 1, k - 1);
            c.push((a[k].clone() - sum) / 2u32);
        }
        Self { coeffs: c }
    }

    /// Computes `(sin(a), cos(a))` with their coupled recurrence. If `hyperbolic` is true,
    /// computes `(sinh(a), cosh(a))` instead.
    fn sin_cos_impl(&self, hyperbolic: bool) -> (Self, Self) {
        let a = &self.coeffs;
        debug_assert!(a.first().map_or(true, |a0| *a0 == 0), "sin / cos require a zero constant term");

        let mut s: Vec<Rational> = Vec::with_capacity(a.len());
        let mut co: Vec<Rational> = Vec::with_capacity(a.len());
        for k in 0..a.len() {
            if k == 0 {
                s.push(rat(0));
                co.push(rat(1));
                continue;
            }
            let sk = chain(a, &co, k);
            let ck = chain(a, &s, k);
            s.push(sk);
            co.push(if hyperbolic { ck } else { -ck });
        }
        (Self { coeffs: s }, Self { coeffs: co })
    }

    /// `sin(a)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn sin(&self) -> Self {
        self.sin_cos_impl(false).0
    }

    /// `cos(a)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn cos(&self) -> Self {
        self.sin_cos_impl(false).1
    }

    /// `sinh(a)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn sinh(&self) -> Self {
        self.sin_cos_impl(true).0
    }

    /// `cosh(a)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn cosh(&self) -> Self {
        self.sin_cos_impl(true).1
    }

    /// Computes `tan(a)` through `c' = a' (1 + c^2)`, or `tanh(a)` through `c' = a' (1 - c^2)`
    /// if `hyperbolic` is true.
    fn tan_impl(&self, hyperbolic: bool) -> Self {
        let a = &self.coeffs;
        debug_assert!(a.first().map_or(true, |a0| *a0 == 0), "tan requires a zero constant term");

        let mut c: Vec<Rational> = Vec::with_capacity(a.len());
        // s = 1 ± c^2, known up to the degree of the last coefficient of c
        let mut s: Vec<Rational> = Vec::with_capacity(a.len());
        for k in 0..a.len() {
            if k == 0 {
                c.push(rat(0));
                s.push(rat(1));
                continue;
            }
            c.push(chain(a, &s, k));
            let square = convolve(&c, &c, k, 0, k);
            s.push(if hyperbolic { -square } else { square });
        }
        Self { coeffs: c }
    }

    /// `tan(a)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn tan(&self) -> Self {
        self.tan_impl(false)
    }

    /// `tanh(a)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn tanh(&self) -> Self {
        self.tan_impl(true)
    }

    /// Returns `1 + sign * a^2`.
    fn one_plus_square(&self, sign: i32) -> Self {
        let square = self.mul_trunc(self, self.len()).scale(&rat(sign));
        Self::one(self.len()).add(&square)
    }

    /// Integrates `a' g` with a zero constant term.
    fn integrate_chain(&self, g: &Self) -> Self {
        let a = &self.coeffs;
        let coeffs = (0..a.len())
            .map(|k| if k == 0 { rat(0) } else { chain(a, &g.coeffs, k) })
            .collect();
        Self { coeffs }
    }

    /// `atan(a)`, through `c' = a' / (1 + a^2)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn atan(&self) -> Self {
        debug_assert!(self.constant_term() == 0, "atan requires a zero constant term");
        let g = self.one_plus_square(1).inv(self.len());
        self.integrate_chain(&g)
    }

    /// `atanh(a)`, through `c' = a' / (1 - a^2)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn atanh(&self) -> Self {
        debug_assert!(self.constant_term() == 0, "atanh requires a zero constant term");
        let g = self.one_plus_square(-1).inv(self.len());
        self.integrate_chain(&g)
    }

    /// `asin(a)`, through `c' = a' / sqrt(1 - a^2)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn asin(&self) -> Self {
        debug_assert!(self.constant_term() == 0, "asin requires a zero constant term");
        let g = self.one_plus_square(-1).sqrt().inv(self.len());
        self.integrate_chain(&g)
    }

    /// `asinh(a)`, through `c' = a' / sqrt(1 + a^2)`.
    ///
    /// **Precondition:** the constant term is zero.
    pub fn asinh(&self) -> Self {
        debug_assert!(self.constant_term() == 0, "asinh requires a zero constant term");
        let g = self.one_plus_square(1).sqrt().inv(self.len());
        self.integrate_chain(&g)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Builds a series from `(numer, denom)` pairs.
    fn series<const N: usize>(coeffs: [(i64, i64); N]) -> RatSeries {
        RatSeries::from_coeffs(coeffs.into_iter().map(|c| rat(c)).collect())
    }

    fn x(len: usize) -> RatSeries {
        RatSeries::identity(len)
    }

    #[test]
    fn constructors() {
        assert_eq!(RatSeries::identity(3), series([(0, 1), (1, 1), (0, 1)]));
        assert_eq!(RatSeries::identity(1), series([(0, 1)]));
        assert_eq!(RatSeries::constant(rat(5), 2), series([(5, 1), (0, 1)]));
        assert_eq!(RatSeries::one(3).truncate(1), series([(1, 1)]));
        assert_eq!(RatSeries::one(1).truncate(3), RatSeries::one(3));
    }

    #[test]
    fn coeff_beyond_length_is_zero() {
        assert_eq!(x(2).coeff(7), 0);
    }

    #[test]
    fn truncated_product() {
        // (1 + x)(1 - x) = 1 - x^2
        let a = series([(1, 1), (1, 1), (0, 1)]);
        let b = series([(1, 1), (-1, 1), (0, 1)]);
        assert_eq!(a.mul_trunc(&b, 3), series([(1, 1), (0, 1), (-1, 1)]));
        assert_eq!(a.mul_trunc(&b, 2), series([(1, 1), (0, 1)]));
    }

    #[test]
    fn power() {
        // (1 + x)^5 = 1 + 5x + 10x^2 + 10x^3 + ...
        let a = RatSeries::one(4).add(&x(4));
        assert_eq!(a.pow(5, 4), series([(1, 1), (5, 1), (10, 1), (10, 1)]));
        assert_eq!(a.pow(0, 4), RatSeries::one(4));
        assert_eq!(x(4).pow(5, 4), RatSeries::zero(4));
    }

    #[test]
    fn inverse() {
        // 1 / (1 - x) = 1 + x + x^2 + x^3
        let a = series([(1, 1), (-1, 1), (0, 1), (0, 1)]);
        assert_eq!(a.inv(4), series([(1, 1), (1, 1), (1, 1), (1, 1)]));

        // 1 / (2 + x) = 1/2 - x/4 + x^2/8
        let b = series([(2, 1), (1, 1), (0, 1)]);
        assert_eq!(b.inv(3), series([(1, 2), (-1, 4), (1, 8)]));
    }

    #[test]
    fn exp_and_log() {
        assert_eq!(x(5).exp(), series([(1, 1), (1, 1), (1, 2), (1, 6), (1, 24)]));

        // log(1 + x) = x - x^2/2 + x^3/3 - x^4/4
        let one_plus_x = RatSeries::one(5).add(&x(5));
        assert_eq!(one_plus_x.log(), series([(0, 1), (1, 1), (-1, 2), (1, 3), (-1, 4)]));

        // exp(log(a)) = a
        assert_eq!(one_plus_x.log().exp(), one_plus_x);
    }

    #[test]
    fn sqrt() {
        // sqrt(1 + x) = 1 + x/2 - x^2/8 + x^3/16
        let one_plus_x = RatSeries::one(4).add(&x(4));
        assert_eq!(one_plus_x.sqrt(), series([(1, 1), (1, 2), (-1, 8), (1, 16)]));
        let root = one_plus_x.sqrt();
        assert_eq!(root.mul_trunc(&root, 4), one_plus_x);
    }

    #[test]
    fn trigonometric() {
        assert_eq!(x(6).sin(), series([(0, 1), (1, 1), (0, 1), (-1, 6), (0, 1), (1, 120)]));
        assert_eq!(x(6).cos(), series([(1, 1), (0, 1), (-1, 2), (0, 1), (1, 24), (0, 1)]));
        assert_eq!(x(6).tan(), series([(0, 1), (1, 1), (0, 1), (1, 3), (0, 1), (2, 15)]));
    }

    #[test]
    fn hyperbolic() {
        assert_eq!(x(6).sinh(), series([(0, 1), (1, 1), (0, 1), (1, 6), (0, 1), (1, 120)]));
        assert_eq!(x(6).cosh(), series([(1, 1), (0, 1), (1, 2), (0, 1), (1, 24), (0, 1)]));
        assert_eq!(x(6).tanh(), series([(0, 1), (1, 1), (0, 1), (-1, 3), (0, 1), (2, 15)]));
    }

    #[test]
    fn inverse_trigonometric() {
        assert_eq!(x(6).asin(), series([(0, 1), (1, 1), (0, 1), (1, 6), (0, 1), (3, 40)]));
        assert_eq!(x(6).asinh(), series([(0, 1), (1, 1), (0, 1), (-1, 6), (0, 1), (3, 40)]));
        assert_eq!(x(6).atan(), series([(0, 1), (1, 1), (0, 1), (-1, 3), (0, 1), (1, 5)]));
        assert_eq!(x(6).atanh(), series([(0, 1), (1, 1), (0, 1), (1, 3), (0, 1), (1, 5)]));
    }

    #[test]
    fn composition_with_nontrivial_argument() {
        // sin(2x) = 2x - 4x^3/3
        let two_x = x(4).scale(&rat(2));
        assert_eq!(two_x.sin(), series([(0, 1), (2, 1), (0, 1), (-4, 3)]));

        // tan(asin(x)) = x + x^3/2 + 3x^5/8
        assert_eq!(x(6).asin().tan(), series([(0, 1), (1, 1), (0, 1), (1, 2), (0, 1), (3, 8)]));
    }

    #[test]
    fn scalar_operations() {
        let a = series([(2, 1), (4, 1)]);
        assert_eq!(a.div_scalar(&rat(4)), series([(1, 2), (1, 1)]));
        assert_eq!(a.scale(&rat((1, 2))), series([(1, 1), (2, 1)]));
    }
}
