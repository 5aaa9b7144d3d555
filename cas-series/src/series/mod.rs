//! Fast truncated power series expansion.
//!
//! Expanding an expression takes three stages:
//!
//! 1. [`classify`] / [`eligibility`] check that the expression depends on at most one variable,
//!    contains only exact numbers, and calls only supported functions.
//! 2. [`compose`] computes the series of the expression bottom-up with exact rational
//!    arithmetic ([`RatSeries`]).
//! 3. [`assemble`] turns the coefficients into a sparse [`PowerSeries`].
//!
//! [`useries`] runs all three. Declining an expression is expected: the fast path only handles a
//! restricted class of expressions, and any [recoverable](SeriesError::is_recoverable) error
//! means the general series algorithm must be used instead. [`series`] does exactly that, given
//! an implementation of the general algorithm through the [`GeneralSeries`] trait.

pub mod assemble;
pub mod classify;
pub mod compose;
pub mod elementary;
pub mod error;
pub mod options;
pub mod ratser;

pub use assemble::{assemble, PowerSeries, Relation, Term};
pub use classify::{classify, eligibility};
pub use compose::compose;
pub use error::{Ineligible, Infeasible, SeriesError};
pub use options::{SeriesOptions, SeriesOptionsBuilder};
pub use ratser::RatSeries;

use crate::symbolic::SymExpr;
use log::debug;

/// Expands `expr` about `relation` to the given order with the default [`SeriesOptions`].
///
/// See [`useries_with`] for details.
///
/// ```
/// use cas_parser::parser::Parser;
/// use cas_series::{series::{useries, Relation}, symbolic::SymExpr};
///
/// let expr = SymExpr::from(Parser::new("exp(x)").try_parse_full().unwrap());
/// let series = useries(&expr, &Relation::at_zero("x"), 4).unwrap();
/// assert_eq!(series.to_string(), "1 + x + 1/2*x^2 + 1/6*x^3 + O(x^4)");
/// ```
pub fn useries(expr: &SymExpr, relation: &Relation, order: usize) -> Result<PowerSeries, SeriesError> {
    useries_with(expr, relation, order, &SeriesOptions::default())
}

/// Expands `expr` about `relation` to the given order, returning the terms of degree `0` up to
/// `order - 1`.
///
/// The expansion point must be `0`, and the expression may depend on no variable other than the
/// expansion variable. An `order` of zero is [`SeriesError::Malformed`].
pub fn useries_with(
    expr: &SymExpr,
    relation: &Relation,
    order: usize,
    options: &SeriesOptions,
) -> Result<PowerSeries, SeriesError> {
    if order == 0 {
        return Err(SeriesError::Malformed("the order must be at least 1".to_string()));
    }

    let declined = |err: SeriesError| {
        debug!("fast series path declined `{}` about {}: {}", expr, relation, err);
        err
    };

    if order > options.max_order {
        return Err(declined(Infeasible::OrderTooLarge { order, max: options.max_order }.into()));
    }
    if relation.point != 0 {
        return Err(declined(Infeasible::NonzeroPoint(relation.point.clone()).into()));
    }

    match eligibility(expr) {
        Ok(Some(var)) if var != relation.var => {
            return Err(declined(Infeasible::VariableMismatch {
                expected: relation.var.clone(),
                found: var.to_string(),
            }.into()));
        },
        Ok(_) => (),
        Err(reason) => return Err(declined(reason.into())),
    }

    let series = compose(expr, order, options).map_err(declined)?;
    Ok(assemble(series, relation.clone(), order))
}

/// The general series expansion algorithm, used when the fast path declines an expression.
pub trait GeneralSeries {
    /// The error type of the general algorithm. Fast path errors that cannot be recovered from
    /// are converted into it.
    type Error: From<SeriesError>;

    /// Expands `expr` about `relation` to the given order.
    fn series(&self, expr: &SymExpr, relation: &Relation, order: usize) -> Result<PowerSeries, Self::Error>;
}

/// Expands `expr` about `relation` to the given order, trying the fast path first and
/// delegating to `general` if the fast path declines the expression.
///
/// [`SeriesError::Malformed`] is never delegated.
pub fn series<G: GeneralSeries>(
    expr: &SymExpr,
    relation: &Relation,
    order: usize,
    general: &G,
) -> Result<PowerSeries, G::Error> {
    match useries(expr, relation, order) {
        Ok(series) => Ok(series),
        Err(err) if err.is_recoverable() => general.series(expr, relation, order),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::Parser;
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use super::*;

    fn parse(source: &str) -> SymExpr {
        SymExpr::from(Parser::new(source).try_parse_full().unwrap())
    }

    fn expand(source: &str, order: usize) -> Result<PowerSeries, SeriesError> {
        useries(&parse(source), &Relation::at_zero("x"), order)
    }

    #[test]
    fn end_to_end() {
        let exp = expand("exp(x)", 4).unwrap();
        let coeffs = (0..4).map(|n| exp.coeff(n).unwrap()).collect::<Vec<_>>();
        assert_eq!(coeffs, vec![rat(1), rat(1), rat((1, 2)), rat((1, 6))]);

        assert_eq!(expand("sin(x) * cos(x)", 4).unwrap().to_string(), "x - 2/3*x^3 + O(x^4)");
        assert_eq!(expand("sqrt(x + 4)", 3).unwrap().to_string(), "2 + 1/4*x - 1/64*x^2 + O(x^3)");
        assert_eq!(expand("tan(x)", 6).unwrap().to_string(), "x + 1/3*x^3 + 2/15*x^5 + O(x^6)");
    }

    #[test]
    fn constant_expression() {
        assert_eq!(expand("1/3 + 2^3", 2).unwrap().to_string(), "25/3 + O(x^2)");
    }

    #[test]
    fn order_checks() {
        assert!(matches!(expand("x", 0), Err(SeriesError::Malformed(_))));

        let opts = SeriesOptionsBuilder::new().max_order(16).build();
        assert_eq!(
            useries_with(&parse("x"), &Relation::at_zero("x"), 17, &opts),
            Err(SeriesError::Infeasible(Infeasible::OrderTooLarge { order: 17, max: 16 })),
        );
        assert!(useries_with(&parse("x"), &Relation::at_zero("x"), 16, &opts).is_ok());
    }

    #[test]
    fn declined_requests() {
        assert_eq!(
            useries(&parse("sin(x)"), &Relation::new("x", rat(1)), 4),
            Err(SeriesError::Infeasible(Infeasible::NonzeroPoint(rat(1)))),
        );
        assert_eq!(
            useries(&parse("sin(y)"), &Relation::at_zero("x"), 4),
            Err(SeriesError::Infeasible(Infeasible::VariableMismatch {
                expected: "x".to_string(),
                found: "y".to_string(),
            })),
        );
        assert_eq!(expand("x + 0.5", 4), Err(SeriesError::Ineligible(Ineligible::InexactNumber)));
        assert!(matches!(expand("log(x)", 4), Err(SeriesError::Infeasible(_))));
    }

    /// A stand-in for the general algorithm, counting how often it is called.
    #[derive(Default)]
    struct Fallback {
        calls: Cell<usize>,
    }

    #[derive(Debug, PartialEq)]
    enum FallbackError {
        Fast(SeriesError),
    }

    impl From<SeriesError> for FallbackError {
        fn from(err: SeriesError) -> Self {
            Self::Fast(err)
        }
    }

    impl GeneralSeries for Fallback {
        type Error = FallbackError;

        fn series(&self, _: &SymExpr, relation: &Relation, order: usize) -> Result<PowerSeries, Self::Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(assemble(RatSeries::zero(order), relation.clone(), order))
        }
    }

    #[test]
    fn fast_path_does_not_fall_back() {
        let general = Fallback::default();
        let result = series(&parse("exp(x)"), &Relation::at_zero("x"), 3, &general).unwrap();
        assert_eq!(result.to_string(), "1 + x + 1/2*x^2 + O(x^3)");
        assert_eq!(general.calls.get(), 0);
    }

    #[test]
    fn recoverable_errors_fall_back() {
        let general = Fallback::default();
        for source in ["log(x)", "x + y", "pi x", "sqrt(x + 2)", "gamma(x)"] {
            let result = series(&parse(source), &Relation::at_zero("x"), 3, &general).unwrap();
            assert_eq!(result.to_string(), "O(x^3)");
        }
        assert_eq!(general.calls.get(), 5);

        series(&parse("x"), &Relation::new("x", rat(1)), 3, &general).unwrap();
        assert_eq!(general.calls.get(), 6);
    }

    #[test]
    fn malformed_requests_do_not_fall_back() {
        let general = Fallback::default();
        let result = series(&parse("x"), &Relation::at_zero("x"), 0, &general);
        assert!(matches!(result, Err(FallbackError::Fast(SeriesError::Malformed(_)))));
        assert_eq!(general.calls.get(), 0);
    }
}
