//! The truncated power series returned to callers.

use rug::Rational;
use std::fmt;
use super::ratser::RatSeries;

/// The variable and point of a series expansion, as in `x = 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    /// The expansion variable.
    pub var: String,

    /// The point the series is expanded about.
    pub point: Rational,
}

impl Relation {
    /// Creates a relation expanding in `var` about `point`.
    pub fn new(var: impl Into<String>, point: Rational) -> Self {
        Self { var: var.into(), point }
    }

    /// Creates a relation expanding in `var` about the origin.
    pub fn at_zero(var: impl Into<String>) -> Self {
        Self::new(var, Rational::new())
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.var, self.point)
    }
}

/// A single nonzero term `coeff * (var - point)^exp` of a [`PowerSeries`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// The coefficient of the term. Never zero.
    pub coeff: Rational,

    /// The degree of the term.
    pub exp: usize,
}

/// A truncated power series with exact rational coefficients.
///
/// Only the nonzero terms are stored, in ascending order of degree. Every term of degree
/// [`PowerSeries::order`] or higher is unknown, and is displayed as an order term `O(x^n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerSeries {
    relation: Relation,
    terms: Vec<Term>,
    order: usize,
}

impl PowerSeries {
    /// Returns the variable and point of the expansion.
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Returns the nonzero terms, in ascending order of degree.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns the truncation order. Terms of this degree and above are unknown.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the coefficient of degree `n`, or [`None`] if `n` is at or beyond the truncation
    /// order.
    pub fn coeff(&self, n: usize) -> Option<Rational> {
        if n >= self.order {
            return None;
        }
        let coeff = self.terms
            .iter()
            .find(|term| term.exp == n)
            .map(|term| term.coeff.clone())
            .unwrap_or_default();
        Some(coeff)
    }
}

/// Formats `(var - point)^exp`, omitting the exponent if it is one.
struct Monomial<'a> {
    relation: &'a Relation,
    exp: usize,
}

impl fmt::Display for Monomial<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Relation { var, point } = self.relation;
        if *point == 0 {
            write!(f, "{}", var)?;
        } else if *point < 0 {
            write!(f, "({} + {})", var, Rational::from(-point))?;
        } else {
            write!(f, "({} - {})", var, point)?;
        }
        if self.exp != 1 {
            write!(f, "^{}", self.exp)?;
        }
        Ok(())
    }
}

impl fmt::Display for PowerSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, Term { coeff, exp }) in self.terms.iter().enumerate() {
            let magnitude = if i == 0 {
                if *coeff < 0 {
                    write!(f, "-")?;
                }
                Rational::from(coeff.abs_ref())
            } else if *coeff < 0 {
                write!(f, " - ")?;
                Rational::from(coeff.abs_ref())
            } else {
                write!(f, " + ")?;
                coeff.clone()
            };

            let monomial = Monomial { relation: &self.relation, exp: *exp };
            match (*exp, magnitude == 1) {
                (0, _) => write!(f, "{}", magnitude)?,
                (_, true) => write!(f, "{}", monomial)?,
                (_, false) => write!(f, "{}*{}", magnitude, monomial)?,
            }
        }

        if !self.terms.is_empty() {
            write!(f, " + ")?;
        }
        write!(f, "O({})", Monomial { relation: &self.relation, exp: self.order })
    }
}

/// Converts the first `order` coefficients of `series` into a [`PowerSeries`] bound to
/// `relation`, dropping the zero coefficients.
pub fn assemble(series: RatSeries, relation: Relation, order: usize) -> PowerSeries {
    let terms = series
        .truncate(order)
        .coeffs()
        .iter()
        .enumerate()
        .filter(|(_, coeff)| **coeff != 0)
        .map(|(exp, coeff)| Term { coeff: coeff.clone(), exp })
        .collect();
    PowerSeries { relation, terms, order }
}

#[cfg(test)]
mod tests {
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    fn series<const N: usize>(coeffs: [(i64, i64); N]) -> RatSeries {
        RatSeries::from_coeffs(coeffs.into_iter().map(rat).collect())
    }

    #[test]
    fn zero_coefficients_are_dropped() {
        let result = assemble(series([(0, 1), (1, 1), (0, 1), (-1, 6)]), Relation::at_zero("x"), 4);
        assert_eq!(result.terms(), &[
            Term { coeff: rat(1), exp: 1 },
            Term { coeff: rat((-1, 6)), exp: 3 },
        ]);
        assert_eq!(result.order(), 4);
        assert_eq!(result.coeff(0), Some(rat(0)));
        assert_eq!(result.coeff(3), Some(rat((-1, 6))));
        assert_eq!(result.coeff(4), None);
    }

    #[test]
    fn display() {
        let exp = assemble(series([(1, 1), (1, 1), (1, 2), (1, 6)]), Relation::at_zero("x"), 4);
        assert_eq!(exp.to_string(), "1 + x + 1/2*x^2 + 1/6*x^3 + O(x^4)");

        let sin = assemble(series([(0, 1), (1, 1), (0, 1), (-1, 6)]), Relation::at_zero("t"), 4);
        assert_eq!(sin.to_string(), "t - 1/6*t^3 + O(t^4)");

        let neg = assemble(series([(-2, 1), (-1, 1)]), Relation::at_zero("x"), 2);
        assert_eq!(neg.to_string(), "-2 - x + O(x^2)");
    }

    #[test]
    fn display_order_term() {
        let zero = assemble(RatSeries::zero(3), Relation::at_zero("x"), 3);
        assert_eq!(zero.to_string(), "O(x^3)");

        let constant = assemble(RatSeries::constant(rat(3), 1), Relation::at_zero("x"), 1);
        assert_eq!(constant.to_string(), "3 + O(x)");
    }

    #[test]
    fn display_shifted_point() {
        let shifted = assemble(series([(1, 1), (-3, 1)]), Relation::new("x", rat(2)), 2);
        assert_eq!(shifted.to_string(), "1 - 3*(x - 2) + O((x - 2)^2)");

        let shifted = assemble(series([(0, 1), (1, 2)]), Relation::new("x", rat(-1)), 2);
        assert_eq!(shifted.to_string(), "1/2*(x + 1) + O((x + 1)^2)");
    }

    #[test]
    fn short_series_is_padded() {
        let result = assemble(series([(1, 1)]), Relation::at_zero("x"), 3);
        assert_eq!(result.coeff(2), Some(rat(0)));
        assert_eq!(result.to_string(), "1 + O(x^3)");
    }
}
