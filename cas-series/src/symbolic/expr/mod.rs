//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](cas_parser::parser::ast::Expr) type from `cas_parser` mirrors the source text:
//! it is convenient for parsing and error reporting, but not for computation. This module defines
//! [`SymExpr`], which **flattens** sums and products into n-ary nodes and keeps their numeric
//! parts apart from the symbolic ones.
//!
//! For example, `2 + x + (3 + y)` is represented as a single [`SymExpr::Add`] with the two terms
//! `x` and `y` and the overall constant `5`, and `2x / 4` as a single [`SymExpr::Mul`] with the
//! factor `x` and the overall coefficient `1/2`.
//!
//! ```
//! use cas_parser::parser::Parser;
//! use cas_series::symbolic::{Number, SymExpr};
//!
//! let ast = Parser::new("2 + x + (3 + y)").try_parse_full().unwrap();
//! let expr = SymExpr::from(ast);
//! assert_eq!(expr, SymExpr::Add {
//!     terms: vec![SymExpr::symbol("x"), SymExpr::symbol("y")],
//!     constant: Number::from(rug::Integer::from(5)),
//! });
//! ```
//!
//! Equality on [`SymExpr`] is **structural**: the terms of a sum compare in order, and no
//! simplification is attempted before comparing.

mod convert;

use super::{func::Func, number::Number};
use crate::primitive::{int, rat};
use std::{fmt, ops::{Add, Mul, Neg}};

/// A named symbolic constant, whose value has no exact rational representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
    Phi,
    I,
}

impl Constant {
    /// Looks up a constant by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            "phi" => Some(Self::Phi),
            "i" => Some(Self::I),
            _ => None,
        }
    }

    /// Returns the name of the constant.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::Phi => "phi",
            Self::I => "i",
        }
    }
}

/// A mathematical expression, flattened into sums of products.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
pub enum SymExpr {
    /// A variable, such as `x`.
    Symbol(String),

    /// A numeric constant, such as `2`, `1/3`, or `0.5`.
    Number(Number),

    /// A named symbolic constant, such as `pi`.
    Constant(Constant),

    /// Multiple terms added together, plus an overall numeric constant.
    Add {
        terms: Vec<SymExpr>,
        constant: Number,
    },

    /// Multiple factors multiplied together, times an overall numeric coefficient.
    Mul {
        factors: Vec<SymExpr>,
        coefficient: Number,
    },

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),

    /// A known function applied to a single argument, such as `sin(x)`.
    Call(Func, Box<SymExpr>),

    /// An expression that has no representation in this model, such as a call to an unknown
    /// function. The original source text is kept for display.
    Other(String),
}

impl SymExpr {
    /// Creates a [`SymExpr::Symbol`] with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates an exact integer.
    pub fn int(n: i64) -> Self {
        Self::Number(Number::Integer(int(n)))
    }

    /// Creates an exact fraction `numer / denom`, stored canonically.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Self::Number(Number::from_rational(rat((numer, denom))))
    }

    /// Creates a call to the given function.
    pub fn call(func: Func, arg: SymExpr) -> Self {
        Self::Call(func, Box::new(arg))
    }

    /// Raises `self` to the given power.
    ///
    /// If both operands are exact numbers and the exponent is an integer, the power is folded
    /// into a single number, unless that would divide by zero or produce a huge number.
    pub fn pow(self, exponent: SymExpr) -> Self {
        if let (Self::Number(base), Self::Number(Number::Integer(exp))) = (&self, &exponent) {
            if let Some(folded) = base.checked_pow(exp) {
                return Self::Number(folded);
            }
        }
        Self::Exp(Box::new(self), Box::new(exponent))
    }

    /// If the expression is a [`SymExpr::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Splits the expression into the terms and the constant of a sum.
    fn into_sum_parts(self) -> (Vec<SymExpr>, Number) {
        match self {
            Self::Add { terms, constant } => (terms, constant),
            Self::Number(n) => (Vec::new(), n),
            expr => (vec![expr], Number::zero()),
        }
    }

    /// Splits the expression into the factors and the coefficient of a product.
    fn into_product_parts(self) -> (Vec<SymExpr>, Number) {
        match self {
            Self::Mul { factors, coefficient } => (factors, coefficient),
            Self::Number(n) => (Vec::new(), n),
            expr => (vec![expr], Number::one()),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in a [`SymExpr::Add`] / [`SymExpr::Mul`] with no terms /
    /// factors, a single term with no constant, a single factor with a unit coefficient, or a
    /// product with a zero coefficient. This function collapses these cases into the single
    /// term / factor or the number they are equal to.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add { mut terms, constant } => {
                if terms.is_empty() {
                    Self::Number(constant)
                } else if terms.len() == 1 && constant.is_zero() {
                    terms.remove(0)
                } else {
                    Self::Add { terms, constant }
                }
            },
            Self::Mul { mut factors, coefficient } => {
                if factors.is_empty() {
                    Self::Number(coefficient)
                } else if coefficient.is_zero() {
                    Self::Number(Number::zero())
                } else if factors.len() == 1 && coefficient.is_one() {
                    factors.remove(0)
                } else {
                    Self::Mul { factors, coefficient }
                }
            },
            expr => expr,
        }
    }

    /// Returns true if the expression must be parenthesized when it appears as the base or the
    /// exponent of a power.
    fn needs_parens_in_power(&self) -> bool {
        match self {
            Self::Symbol(_) | Self::Constant(_) | Self::Call(..) | Self::Other(_) => false,
            Self::Number(Number::Integer(n)) => *n < 0,
            _ => true,
        }
    }
}

/// Adds two expressions, flattening nested sums and folding their constants together.
impl Add for SymExpr {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        let (mut terms, constant) = self.into_sum_parts();
        let (rhs_terms, rhs_constant) = rhs.into_sum_parts();
        terms.extend(rhs_terms);
        SymExpr::Add { terms, constant: constant + rhs_constant }.downgrade()
    }
}

/// Multiplies two expressions, flattening nested products and folding their coefficients
/// together.
impl Mul for SymExpr {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        let (mut factors, coefficient) = self.into_product_parts();
        let (rhs_factors, rhs_coefficient) = rhs.into_product_parts();
        factors.extend(rhs_factors);
        SymExpr::Mul { factors, coefficient: coefficient * rhs_coefficient }.downgrade()
    }
}

impl Neg for SymExpr {
    type Output = SymExpr;

    fn neg(self) -> Self::Output {
        match self {
            SymExpr::Number(n) => SymExpr::Number(-n),
            expr => expr * SymExpr::int(-1),
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Number(n) => write!(f, "{}", n),
            Self::Constant(c) => write!(f, "{}", c.name()),
            Self::Add { terms, constant } => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                if !constant.is_zero() {
                    write!(f, " + {}", constant)?;
                }
                Ok(())
            },
            Self::Mul { factors, coefficient } => {
                let mut first = true;
                if !coefficient.is_one() {
                    write!(f, "{}", coefficient)?;
                    first = false;
                }
                for factor in factors {
                    if !first {
                        write!(f, " * ")?;
                    }
                    first = false;
                    if matches!(factor, Self::Add { .. }) {
                        write!(f, "({})", factor)?;
                    } else {
                        write!(f, "{}", factor)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                if base.needs_parens_in_power() {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "^")?;
                if exp.needs_parens_in_power() {
                    write!(f, "({})", exp)
                } else {
                    write!(f, "{}", exp)
                }
            },
            Self::Call(func, arg) => write!(f, "{}({})", func, arg),
            Self::Other(text) => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn flatten_sums() {
        let expr = (SymExpr::symbol("x") + SymExpr::int(2)) + (SymExpr::symbol("x") + SymExpr::int(3));
        assert_eq!(expr, SymExpr::Add {
            terms: vec![SymExpr::symbol("x"), SymExpr::symbol("x")],
            constant: Number::Integer(int(5)),
        });
    }

    #[test]
    fn flatten_products() {
        let expr = SymExpr::int(2) * SymExpr::symbol("x") * SymExpr::rational(1, 4);
        assert_eq!(expr, SymExpr::Mul {
            factors: vec![SymExpr::symbol("x")],
            coefficient: Number::Rational(rat((1, 2))),
        });
    }

    #[test]
    fn downgrade_trivial_nodes() {
        assert_eq!(SymExpr::symbol("x") + SymExpr::int(0), SymExpr::symbol("x"));
        assert_eq!(SymExpr::symbol("x") * SymExpr::int(1), SymExpr::symbol("x"));
        assert_eq!(SymExpr::symbol("x") * SymExpr::int(0), SymExpr::int(0));
        assert_eq!(SymExpr::int(2) + SymExpr::int(3), SymExpr::int(5));
    }

    #[test]
    fn fold_numeric_powers() {
        assert_eq!(SymExpr::int(2).pow(SymExpr::int(-1)), SymExpr::rational(1, 2));
        assert_eq!(
            SymExpr::int(0).pow(SymExpr::int(-1)),
            SymExpr::Exp(Box::new(SymExpr::int(0)), Box::new(SymExpr::int(-1))),
        );
        assert!(matches!(SymExpr::int(4).pow(SymExpr::rational(1, 2)), SymExpr::Exp(..)));
    }

    #[test]
    fn negation() {
        assert_eq!(-SymExpr::int(3), SymExpr::int(-3));
        assert_eq!(-SymExpr::symbol("x"), SymExpr::Mul {
            factors: vec![SymExpr::symbol("x")],
            coefficient: Number::Integer(int(-1)),
        });
    }

    #[test]
    fn display() {
        let expr = SymExpr::call(Func::Sin, SymExpr::symbol("x")) * (SymExpr::symbol("x") + SymExpr::int(1)).pow(SymExpr::rational(1, 2));
        assert_eq!(expr.to_string(), "sin(x) * (x + 1)^(1/2)");
        assert_eq!((SymExpr::int(3) * SymExpr::symbol("x")).to_string(), "3 * x");
    }
}
