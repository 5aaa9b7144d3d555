//! Conversion from the parser's AST into [`SymExpr`].

use cas_parser::parser::ast::{BinOpKind, Expr as AstExpr, Literal, UnaryOpKind};
use crate::primitive::{float_from_str, int_from_str};
use crate::symbolic::{func::Func, number::Number};
use super::{Constant, SymExpr};

/// Converts a parsed expression into a [`SymExpr`].
///
/// The conversion is lossy: spans are dropped, and sums and products are flattened with their
/// numeric parts folded together. Subtraction becomes addition of the negated operand, division
/// becomes multiplication by the operand raised to `-1`, and `sqrt(a)` becomes `a^(1/2)`.
/// Anything the model cannot represent (unknown functions, calls with the wrong number of
/// arguments) becomes a [`SymExpr::Other`] holding its source text.
impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => match int_from_str(&int.value) {
                    Some(n) => Self::Number(Number::Integer(n)),
                    None => Self::Other(int.value),
                },
                Literal::Float(float) => match float_from_str(&float.value) {
                    Some(f) => Self::Number(Number::Float(f)),
                    None => Self::Other(float.value),
                },
                Literal::Symbol(sym) => match Constant::from_name(&sym.name) {
                    Some(constant) => Self::Constant(constant),
                    None => Self::Symbol(sym.name),
                },
            },
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                if call.args.len() != 1 {
                    return Self::Other(AstExpr::Call(call).to_string());
                }

                let name = call.name.name.as_str();
                if name == "sqrt" {
                    let mut args = call.args;
                    return Self::from(args.remove(0)).pow(SymExpr::rational(1, 2));
                }

                match Func::from_name(name) {
                    Some(func) => {
                        let mut args = call.args;
                        Self::call(func, Self::from(args.remove(0)))
                    },
                    None => Self::Other(AstExpr::Call(call).to_string()),
                }
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs + -rhs,
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs * rhs.pow(SymExpr::int(-1)),
                    BinOpKind::Exp => lhs.pow(rhs),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use crate::primitive::{int, rat};
    use super::*;

    fn convert(source: &str) -> SymExpr {
        SymExpr::from(Parser::new(source).try_parse_full().unwrap())
    }

    #[test]
    fn fold_numeric_terms() {
        assert_eq!(convert("1 + x - 3"), SymExpr::Add {
            terms: vec![SymExpr::symbol("x")],
            constant: Number::Integer(int(-2)),
        });
    }

    #[test]
    fn division_by_number() {
        assert_eq!(convert("x / 4"), SymExpr::Mul {
            factors: vec![SymExpr::symbol("x")],
            coefficient: Number::Rational(rat((1, 4))),
        });
        assert_eq!(convert("1/2"), SymExpr::rational(1, 2));
    }

    #[test]
    fn division_by_expression() {
        assert_eq!(
            convert("1 / (1 - x)"),
            SymExpr::Exp(
                Box::new(SymExpr::Add {
                    terms: vec![-SymExpr::symbol("x")],
                    constant: Number::one(),
                }),
                Box::new(SymExpr::int(-1)),
            ),
        );
    }

    #[test]
    fn sqrt_is_half_power() {
        assert_eq!(
            convert("sqrt(x + 4)"),
            SymExpr::Exp(
                Box::new(SymExpr::Add {
                    terms: vec![SymExpr::symbol("x")],
                    constant: Number::Integer(int(4)),
                }),
                Box::new(SymExpr::rational(1, 2)),
            ),
        );
    }

    #[test]
    fn functions_and_constants() {
        assert_eq!(convert("ln(x)"), SymExpr::call(Func::Log, SymExpr::symbol("x")));
        assert_eq!(convert("pi"), SymExpr::Constant(Constant::Pi));
        assert_eq!(convert("gamma(x)"), SymExpr::Other("gamma(x)".to_string()));
        assert_eq!(convert("sin(x, y)"), SymExpr::Other("sin(x, y)".to_string()));
    }

    #[test]
    fn huge_powers_stay_unfolded() {
        let SymExpr::Add { terms, constant } = convert("3^2000000000 + x") else {
            panic!("expected a sum");
        };
        assert!(constant.is_zero());
        assert!(terms.contains(&SymExpr::Exp(
            Box::new(SymExpr::int(3)),
            Box::new(SymExpr::int(2_000_000_000)),
        )));
        assert_eq!(convert("2^10"), SymExpr::int(1024));
    }

    #[test]
    fn floats_stay_inexact() {
        let expr = convert("0.5x");
        let SymExpr::Mul { coefficient, .. } = expr else {
            panic!("expected a product");
        };
        assert!(!coefficient.is_exact());
    }

    #[test]
    fn nested_products_flatten() {
        assert_eq!(convert("2x * (3 * sin(x))"), SymExpr::Mul {
            factors: vec![SymExpr::symbol("x"), SymExpr::call(Func::Sin, SymExpr::symbol("x"))],
            coefficient: Number::Integer(int(6)),
        });
    }
}
