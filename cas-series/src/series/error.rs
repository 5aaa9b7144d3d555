//! Reasons the fast path can decline or fail to expand an expression.

use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::EXPR;
use crate::symbolic::{Constant, Func};
use rug::{Integer, Rational};
use std::fmt;
use super::elementary::ConstantTerm;

/// The structural reason an expression was rejected before any series was computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Ineligible {
    /// The expression contains a symbolic constant with no exact rational value.
    SymbolicConstant(Constant),

    /// The expression contains an inexact (floating-point) number.
    InexactNumber,

    /// The expression contains more than one variable.
    SecondVariable {
        /// The variable encountered first.
        first: String,

        /// The different variable encountered afterwards.
        second: String,
    },

    /// The expression calls a function outside the supported set.
    UnsupportedFunction(Func),

    /// The expression contains a node the expression model cannot represent.
    Unrepresentable(String),
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolicConstant(c) => write!(f, "`{}` has no exact rational value", c.name()),
            Self::InexactNumber => write!(f, "the expression contains an inexact number"),
            Self::SecondVariable { first, second } => write!(
                f,
                "the expression depends on more than one variable (`{}` and `{}`)",
                first, second,
            ),
            Self::UnsupportedFunction(func) => write!(f, "`{}` is not supported", func),
            Self::Unrepresentable(expr) => write!(f, "`{}` cannot be expanded", expr),
        }
    }
}

/// A precondition that only failed once the series of a subexpression was known.
#[derive(Debug, Clone, PartialEq)]
pub enum Infeasible {
    /// A generalized power `b^e` has a base vanishing at the origin.
    LogOfZero,

    /// A generalized power `b^e` has a base whose constant term is neither zero nor one, so its
    /// logarithm is not rational.
    IrrationalLog(Rational),

    /// A half-integer power has a radicand whose constant term is not the square of a rational.
    NotPerfectSquare(Rational),

    /// A half-integer power has a radicand vanishing at the origin.
    ZeroRadicand,

    /// A negative integer or non-half-integer rational power has a base whose constant term is
    /// not one.
    ConstantTermNotOne(Rational),

    /// An elementary function was applied to an argument with the wrong constant term.
    FunctionPrecondition {
        /// The function.
        func: Func,

        /// The constant term the function requires.
        expected: ConstantTerm,

        /// The constant term of the argument.
        found: Rational,
    },

    /// An integer exponent does not fit in the range supported by the truncated power.
    ExponentTooLarge(Integer),

    /// The requested truncation order exceeds the configured maximum.
    OrderTooLarge {
        /// The requested order.
        order: usize,

        /// The largest accepted order.
        max: usize,
    },

    /// The expansion point is not the origin.
    NonzeroPoint(Rational),

    /// The expression's variable is not the variable of the expansion.
    VariableMismatch {
        /// The variable of the expansion.
        expected: String,

        /// The variable found in the expression.
        found: String,
    },
}

impl fmt::Display for Infeasible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogOfZero => write!(f, "the base of a power vanishes at the expansion point"),
            Self::IrrationalLog(c0) => write!(
                f,
                "the base of a power starts with {}, so its logarithm is not rational",
                c0,
            ),
            Self::NotPerfectSquare(c0) => write!(
                f,
                "the radicand starts with {}, which is not the square of a rational",
                c0,
            ),
            Self::ZeroRadicand => write!(f, "the radicand vanishes at the expansion point"),
            Self::ConstantTermNotOne(c0) => write!(
                f,
                "the base of a power starts with {}, but must start with 1",
                c0,
            ),
            Self::FunctionPrecondition { func, expected, found } => write!(
                f,
                "the argument of `{}` starts with {}, but must start with {}",
                func, found, expected,
            ),
            Self::ExponentTooLarge(n) => write!(f, "the exponent {} is too large", n),
            Self::OrderTooLarge { order, max } => write!(
                f,
                "the order {} exceeds the maximum of {}",
                order, max,
            ),
            Self::NonzeroPoint(point) => write!(
                f,
                "only expansions about 0 are supported, not about {}",
                point,
            ),
            Self::VariableMismatch { expected, found } => write!(
                f,
                "the expression depends on `{}`, not on the expansion variable `{}`",
                found, expected,
            ),
        }
    }
}

/// An error produced by the fast series expansion.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = self.headline(), labels = [self.reason()], help = self.help())]
pub enum SeriesError {
    /// The expression was rejected by the eligibility check.
    Ineligible(Ineligible),

    /// The expression was eligible, but a precondition failed during composition.
    Infeasible(Infeasible),

    /// The expression or request is inconsistent with the fast path itself, for example a node
    /// reaching composition that the eligibility check should have rejected, or an order of
    /// zero. This is a bug in the caller or in this crate.
    Malformed(String),
}

impl SeriesError {
    /// Returns true if the general series algorithm should be tried instead.
    ///
    /// [`SeriesError::Malformed`] is not recoverable: it is returned to the caller unchanged.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Malformed(_))
    }

    fn headline(&self) -> &'static str {
        match self {
            Self::Ineligible(_) => "the fast series path cannot expand this expression",
            Self::Infeasible(_) => "the fast series path failed to expand this expression",
            Self::Malformed(_) => "malformed series request",
        }
    }

    fn reason(&self) -> String {
        match self {
            Self::Ineligible(reason) => reason.to_string(),
            Self::Infeasible(reason) => reason.to_string(),
            Self::Malformed(reason) => reason.clone(),
        }
    }

    fn help(&self) -> String {
        match self {
            Self::Ineligible(_) | Self::Infeasible(_) => {
                format!("the {} series algorithm is required", "general".fg(EXPR))
            },
            Self::Malformed(_) => "this request should have been rejected before expansion".to_string(),
        }
    }
}

impl From<Ineligible> for SeriesError {
    fn from(reason: Ineligible) -> Self {
        Self::Ineligible(reason)
    }
}

impl From<Infeasible> for SeriesError {
    fn from(reason: Infeasible) -> Self {
        Self::Infeasible(reason)
    }
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ineligible(reason) => write!(f, "ineligible for the fast series path: {}", reason),
            Self::Infeasible(reason) => write!(f, "infeasible for the fast series path: {}", reason),
            Self::Malformed(reason) => write!(f, "malformed series request: {}", reason),
        }
    }
}

impl std::error::Error for SeriesError {}

#[cfg(test)]
mod tests {
    use crate::primitive::rat;
    use super::*;

    #[test]
    fn recoverable() {
        assert!(SeriesError::from(Ineligible::InexactNumber).is_recoverable());
        assert!(SeriesError::from(Infeasible::LogOfZero).is_recoverable());
        assert!(!SeriesError::Malformed("order must be at least 1".to_string()).is_recoverable());
    }

    #[test]
    fn messages() {
        let err = SeriesError::from(Infeasible::FunctionPrecondition {
            func: Func::Log,
            expected: ConstantTerm::One,
            found: rat(0),
        });
        assert_eq!(
            err.to_string(),
            "infeasible for the fast series path: the argument of `log` starts with 0, but must start with 1",
        );

        let err = SeriesError::from(Ineligible::SecondVariable {
            first: "x".to_string(),
            second: "y".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "ineligible for the fast series path: the expression depends on more than one variable (`x` and `y`)",
        );
    }

    #[test]
    fn report_mentions_reason() {
        let err = cas_error::Error::new(vec![0..6], SeriesError::from(Infeasible::LogOfZero));
        let report = String::from_utf8(strip_ansi_escapes::strip(err.report_to_string("log(x)"))).unwrap();
        assert!(report.contains("the fast series path failed to expand this expression"));
        assert!(report.contains("the base of a power vanishes at the expansion point"));
        assert!(report.contains("series algorithm is required"));
    }

    #[test]
    fn malformed_report() {
        let err = cas_error::Error::new(
            vec![0..1],
            SeriesError::Malformed("the order must be at least 1".to_string()),
        );
        let report = String::from_utf8(strip_ansi_escapes::strip(err.report_to_string("x"))).unwrap();
        assert!(report.contains("malformed series request"));
        assert!(report.contains("the order must be at least 1"));
        assert!(!report.contains("series algorithm is required"));
    }
}
