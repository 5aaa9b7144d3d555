//! Turns a line of input into a series expansion request.

use cas_error::Error;
use cas_parser::parser::{ast::{Call, Expr, Literal}, Parser};
use cas_series::{series::{eligibility, Relation}, symbolic::SymExpr};
use crate::error::InvalidSeriesCall;
use std::ops::Range;

/// The order used when the input is a bare expression.
pub const DEFAULT_ORDER: usize = 6;

/// The variable used when a bare expression has none.
const DEFAULT_VAR: &str = "x";

/// A series expansion to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The expression to expand.
    pub expr: SymExpr,

    /// The region of the input containing the expression.
    pub span: Range<usize>,

    /// The expansion variable and point.
    pub relation: Relation,

    /// The truncation order.
    pub order: usize,
}

/// Removes any parentheses surrounding the expression.
fn unwrap_parens(expr: Expr) -> Expr {
    match expr {
        Expr::Paren(paren) => paren.into_innermost(),
        expr => expr,
    }
}

/// Builds a request from a call to `series(expr, var, order)`.
fn from_call(call: Call) -> Result<Request, Error> {
    let count = call.args.len();
    let Ok([expr, var, order]) = <[Expr; 3]>::try_from(call.args) else {
        return Err(Error::new(vec![call.span], InvalidSeriesCall::ArgumentCount(count)));
    };

    let var = match unwrap_parens(var) {
        Expr::Literal(Literal::Symbol(sym)) => sym.name,
        other => return Err(Error::new(vec![other.span()], InvalidSeriesCall::NotAVariable)),
    };
    let order = match unwrap_parens(order) {
        Expr::Literal(Literal::Integer(int)) => int.value
            .parse::<usize>()
            .map_err(|_| Error::new(vec![int.span], InvalidSeriesCall::NotAnOrder))?,
        other => return Err(Error::new(vec![other.span()], InvalidSeriesCall::NotAnOrder)),
    };

    Ok(Request {
        span: expr.span(),
        expr: SymExpr::from(expr),
        relation: Relation::at_zero(var),
        order,
    })
}

/// Parses a line of input.
///
/// The input is either a call `series(expr, var, order)`, or a bare expression, which is expanded
/// to order [`DEFAULT_ORDER`] in the only variable it contains.
pub fn parse_request(input: &str) -> Result<Request, Error> {
    match Parser::new(input).try_parse_full()? {
        Expr::Call(call) if call.name.name == "series" => from_call(call),
        expr => {
            let span = expr.span();
            let expr = SymExpr::from(expr);
            let var = eligibility(&expr)
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_VAR)
                .to_string();
            Ok(Request { expr, span, relation: Relation::at_zero(var), order: DEFAULT_ORDER })
        },
    }
}
