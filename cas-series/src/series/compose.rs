//! Builds the truncated series of an eligible expression.
//!
//! The composer walks the expression bottom-up. Sums and products combine the series of their
//! operands. Powers and elementary functions are composed with the series of their argument,
//! after checking the constant term of that series against the precondition of the operation.
//! A failed check is reported as [`Infeasible`] and never reaches [`RatSeries`].

use crate::symbolic::{number::pow_fits, Number, SymExpr};
use log::trace;
use rug::{Integer, Rational};
use super::{
    elementary,
    error::{Infeasible, SeriesError},
    options::SeriesOptions,
    ratser::RatSeries,
};

/// Returns the exact value of a number appearing in an expression.
fn exact(n: &Number) -> Result<Rational, SeriesError> {
    n.as_rational()
        .ok_or_else(|| SeriesError::Malformed(format!("inexact number `{}` reached composition", n)))
}

/// Returns `|n|` as an exponent for [`RatSeries::pow`].
fn magnitude(n: &Integer) -> Result<u32, SeriesError> {
    Integer::from(n.abs_ref())
        .to_u32()
        .ok_or_else(|| Infeasible::ExponentTooLarge(n.clone()).into())
}

/// Checks that raising a series with constant term `c0` to the power `exp` keeps its constant
/// term small enough to compute exactly. `n` is the exponent reported on failure.
fn check_growth(c0: &Rational, exp: u32, n: &Integer) -> Result<(), SeriesError> {
    if pow_fits(c0, exp) {
        Ok(())
    } else {
        Err(Infeasible::ExponentTooLarge(n.clone()).into())
    }
}

/// The state of a single composition.
#[derive(Debug)]
struct Composer<'a> {
    options: &'a SeriesOptions,
}

impl Composer<'_> {
    /// Computes the series of `expr` to exactly `order` coefficients.
    fn series(&self, expr: &SymExpr, order: usize) -> Result<RatSeries, SeriesError> {
        let series = match expr {
            SymExpr::Symbol(_) => RatSeries::identity(order),
            SymExpr::Number(n) => RatSeries::constant(exact(n)?, order),
            SymExpr::Add { terms, constant } => self.sum(terms, constant, order)?,
            SymExpr::Mul { factors, coefficient } => self.product(factors, coefficient, order)?,
            SymExpr::Exp(base, exponent) => self.power(base, exponent, order)?,
            SymExpr::Call(func, arg) => {
                let Some(entry) = elementary::lookup(*func) else {
                    return Err(SeriesError::Malformed(format!(
                        "unsupported function `{}` reached composition",
                        func,
                    )));
                };
                let arg = self.series(arg, order)?;
                let c0 = arg.constant_term();
                if !entry.requires.holds(&c0) {
                    return Err(Infeasible::FunctionPrecondition {
                        func: *func,
                        expected: entry.requires,
                        found: c0,
                    }.into());
                }
                (entry.apply)(&arg)
            },
            SymExpr::Constant(_) | SymExpr::Other(_) => {
                return Err(SeriesError::Malformed(format!(
                    "`{}` reached composition",
                    expr,
                )));
            },
        };

        trace!("series of `{}` to order {}: {:?}", expr, order, series.coeffs());
        Ok(series)
    }

    fn sum(&self, terms: &[SymExpr], constant: &Number, order: usize) -> Result<RatSeries, SeriesError> {
        let mut acc = RatSeries::zero(order);
        for term in terms {
            acc = acc.add(&self.series(term, order)?);
        }
        if !constant.is_zero() {
            acc = acc.add(&RatSeries::constant(exact(constant)?, order));
        }
        Ok(acc)
    }

    fn product(&self, factors: &[SymExpr], coefficient: &Number, order: usize) -> Result<RatSeries, SeriesError> {
        let guarded = order.checked_add(self.options.product_guard).ok_or_else(|| {
            SeriesError::Malformed(format!(
                "the product guard {} overflows order {}",
                self.options.product_guard,
                order,
            ))
        })?;
        let mut acc = RatSeries::one(guarded);
        for factor in factors {
            acc = acc.mul_trunc(&self.series(factor, guarded)?, guarded);
        }
        if !coefficient.is_one() {
            acc = acc.scale(&exact(coefficient)?);
        }
        Ok(acc.truncate(order))
    }

    fn power(&self, base: &SymExpr, exponent: &SymExpr, order: usize) -> Result<RatSeries, SeriesError> {
        match exponent.as_number() {
            None => self.general_power(base, exponent, order),
            Some(Number::Integer(n)) => self.integer_power(base, n, order),
            Some(Number::Rational(r)) if *r.denom() == 2 => self.half_power(base, r.numer(), order),
            Some(Number::Rational(r)) => self.rational_power(base, r, order),
            Some(Number::Float(_)) => Err(SeriesError::Malformed(format!(
                "inexact exponent `{}` reached composition",
                exponent,
            ))),
        }
    }

    /// `b^e = exp(e log(b))`, for an exponent that is not a number.
    fn general_power(&self, base: &SymExpr, exponent: &SymExpr, order: usize) -> Result<RatSeries, SeriesError> {
        let b = self.series(base, order)?;
        let c0 = b.constant_term();
        if c0 == 0 {
            return Err(Infeasible::LogOfZero.into());
        }
        if c0 != 1 {
            return Err(Infeasible::IrrationalLog(c0).into());
        }
        let log_b = b.log();
        let e = self.series(exponent, order)?;
        Ok(e.mul_trunc(&log_b, order).exp())
    }

    /// `b^(n/2)`, with the square root taken on the branch that is positive at the origin.
    fn half_power(&self, base: &SymExpr, numer: &Integer, order: usize) -> Result<RatSeries, SeriesError> {
        let b = self.series(base, order)?;
        let c0 = b.constant_term();
        if c0 == 0 {
            return Err(Infeasible::ZeroRadicand.into());
        }
        if !c0.numer().is_perfect_square() || !c0.denom().is_perfect_square() {
            return Err(Infeasible::NotPerfectSquare(c0).into());
        }

        let scale = Rational::from((c0.numer().clone().sqrt(), c0.denom().clone().sqrt()));
        let root = b.div_scalar(&c0).sqrt().scale(&scale);
        let n = magnitude(numer)?;
        check_growth(&scale, n, numer)?;
        if *numer < 0 {
            Ok(root.inv(order).pow(n, order))
        } else {
            Ok(root.pow(n, order))
        }
    }

    /// `b^(p/q) = exp((p/q) log(b))`.
    fn rational_power(&self, base: &SymExpr, r: &Rational, order: usize) -> Result<RatSeries, SeriesError> {
        let b = self.series(base, order)?;
        let c0 = b.constant_term();
        if c0 != 1 {
            return Err(Infeasible::ConstantTermNotOne(c0).into());
        }
        Ok(b.log().scale(r).exp())
    }

    fn integer_power(&self, base: &SymExpr, n: &Integer, order: usize) -> Result<RatSeries, SeriesError> {
        // b^0 = 1, even if b itself cannot be expanded
        if n.is_zero() {
            return Ok(RatSeries::one(order));
        }

        let b = self.series(base, order)?;
        let exp = magnitude(n)?;
        if *n > 0 {
            check_growth(&b.constant_term(), exp, n)?;
            return Ok(b.pow(exp, order));
        }

        let c0 = b.constant_term();
        if c0 != 1 {
            return Err(Infeasible::ConstantTermNotOne(c0).into());
        }
        Ok(b.inv(order).pow(exp, order))
    }
}

/// Computes the first `order` coefficients of the series of `expr` about the origin.
///
/// The expression must have been accepted by [`super::classify`]; nodes the classifier rejects
/// are reported as [`SeriesError::Malformed`]. Orders above [`SeriesOptions::max_order`] are
/// refused, as is a product guard larger than that limit. The returned series has exactly
/// `order` coefficients.
pub fn compose(expr: &SymExpr, order: usize, options: &SeriesOptions) -> Result<RatSeries, SeriesError> {
    if order == 0 {
        return Err(SeriesError::Malformed("the order must be at least 1".to_string()));
    }
    if order > options.max_order {
        return Err(Infeasible::OrderTooLarge { order, max: options.max_order }.into());
    }
    if options.product_guard > options.max_order {
        return Err(SeriesError::Malformed(format!(
            "the product guard {} exceeds the maximum order {}",
            options.product_guard,
            options.max_order,
        )));
    }
    Composer { options }.series(expr, order)
}
