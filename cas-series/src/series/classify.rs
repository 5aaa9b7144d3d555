//! Decides whether an expression is simple enough for the fast path to be attempted.
//!
//! An expression is eligible if it depends on at most one variable, contains only exact numbers,
//! and calls only the functions listed in [`super::elementary::ELEMENTARY`]. Eligibility is a
//! structural check: an eligible expression can still fail to expand once the series of its
//! subexpressions are known (see [`super::error::Infeasible`]).

use crate::symbolic::{Number, SymExpr};
use super::{elementary, error::Ineligible};

/// The state of a single classification pass.
#[derive(Debug, Default)]
struct Classifier<'a> {
    /// The first variable encountered. Every other symbol in the expression must be equal to it.
    var: Option<&'a str>,
}

impl<'a> Classifier<'a> {
    fn visit(&mut self, expr: &'a SymExpr) -> Result<(), Ineligible> {
        match expr {
            SymExpr::Symbol(name) => match self.var {
                None => {
                    self.var = Some(name.as_str());
                    Ok(())
                },
                Some(var) if var == name.as_str() => Ok(()),
                Some(var) => Err(Ineligible::SecondVariable {
                    first: var.to_string(),
                    second: name.clone(),
                }),
            },
            SymExpr::Number(n) => exact(n),
            SymExpr::Constant(c) => Err(Ineligible::SymbolicConstant(*c)),
            SymExpr::Add { terms, constant } => {
                exact(constant)?;
                terms.iter().try_for_each(|term| self.visit(term))
            },
            SymExpr::Mul { factors, coefficient } => {
                exact(coefficient)?;
                factors.iter().try_for_each(|factor| self.visit(factor))
            },
            SymExpr::Exp(base, exponent) => {
                self.visit(base)?;
                self.visit(exponent)
            },
            SymExpr::Call(func, arg) => {
                if elementary::lookup(*func).is_none() {
                    return Err(Ineligible::UnsupportedFunction(*func));
                }
                self.visit(arg)
            },
            SymExpr::Other(text) => Err(Ineligible::Unrepresentable(text.clone())),
        }
    }
}

fn exact(n: &Number) -> Result<(), Ineligible> {
    if n.is_exact() {
        Ok(())
    } else {
        Err(Ineligible::InexactNumber)
    }
}

/// Checks whether the fast path may be attempted on the given expression.
///
/// Returns the single variable the expression depends on ([`None`] if it is constant), or the
/// reason it was rejected.
///
/// ```
/// use cas_parser::parser::Parser;
/// use cas_series::{series::eligibility, symbolic::SymExpr};
///
/// let expr = SymExpr::from(Parser::new("sin(t)^2 + t").try_parse_full().unwrap());
/// assert_eq!(eligibility(&expr), Ok(Some("t")));
/// ```
pub fn eligibility(expr: &SymExpr) -> Result<Option<&str>, Ineligible> {
    let mut classifier = Classifier::default();
    classifier.visit(expr)?;
    Ok(classifier.var)
}

/// Returns true if the fast path may be attempted on the given expression.
pub fn classify(expr: &SymExpr) -> bool {
    eligibility(expr).is_ok()
}
