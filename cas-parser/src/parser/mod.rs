pub mod ast;
pub mod error;

use ast::{
    BinOp,
    BinOpKind,
    Binary,
    Call,
    Expr,
    LitFloat,
    LitInt,
    LitSym,
    Literal,
    Paren,
    Unary,
    UnaryOp,
    UnaryOpKind,
};
use error::{Error, ExpectedEof, UnclosedParenthesis, UnexpectedEof, UnexpectedToken};
use cas_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// The tokens that can begin an operand.
const OPERAND_START: &[TokenKind] = &[
    TokenKind::Name,
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::OpenParen,
    TokenKind::Sub,
];

/// A recursive-descent parser for expressions.
///
/// The grammar, from lowest to highest precedence:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary | <implicit> unary)*
/// unary   := '-' unary | power
/// power   := primary ('^' unary)?
/// primary := Int | Float | Name '(' args ')' | Name | '(' expr ')'
/// args    := (expr (',' expr)*)?
/// ```
///
/// Exponentiation is right-associative, and binds tighter than negation, so `-x^2` is read as
/// `-(x^2)`.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Moves the cursor past any whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the next non-whitespace token without consuming it.
    pub fn peek_token(&mut self) -> Option<&Token<'source>> {
        self.skip_whitespace();
        self.tokens.get(self.cursor)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(UnexpectedEof)),
        }
    }

    /// Consumes the next token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Option<Token<'source>> {
        if self.peek_token().is_some_and(|token| token.kind == kind) {
            self.next_token().ok()
        } else {
            None
        }
    }

    /// Parses a complete expression. The entire source must be consumed, otherwise an
    /// [`ExpectedEof`] error spanning the remaining input is returned.
    pub fn try_parse_full(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_expr()?;
        if self.peek_token().is_some() {
            let start = self.span().start;
            let end = self.eof_span().end;
            return Err(Error::new(vec![start..end], ExpectedEof));
        }
        Ok(expr)
    }

    /// Parses a sum / difference of terms.
    pub fn parse_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_term()?;
        loop {
            let kind = match self.peek_token().map(|token| token.kind) {
                Some(TokenKind::Add) => BinOpKind::Add,
                Some(TokenKind::Sub) => BinOpKind::Sub,
                _ => return Ok(lhs),
            };
            let op = self.next_token()?;
            let rhs = self.parse_term()?;
            lhs = binary(lhs, BinOp { kind, implicit: false, span: op.span }, rhs);
        }
    }

    /// Parses a product / quotient of factors, including implicit multiplication.
    fn parse_term(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_token().map(|token| (token.kind, token.span.clone())) {
                Some((TokenKind::Mul, span)) => {
                    self.cursor += 1;
                    BinOp { kind: BinOpKind::Mul, implicit: false, span }
                },
                Some((TokenKind::Div, span)) => {
                    self.cursor += 1;
                    BinOp { kind: BinOpKind::Div, implicit: false, span }
                },
                Some((kind, span)) if kind.starts_operand() => {
                    BinOp { kind: BinOpKind::Mul, implicit: true, span: span.start..span.start }
                },
                _ => return Ok(lhs),
            };
            let rhs = self.parse_unary()?;
            lhs = binary(lhs, op, rhs);
        }
    }

    /// Parses a (possibly negated) power.
    fn parse_unary(&mut self) -> Result<Expr, Error> {
        if let Some(op) = self.eat(TokenKind::Sub) {
            let operand = self.parse_unary()?;
            let span = op.span.start..operand.span().end;
            return Ok(Expr::Unary(Unary {
                operand: Box::new(operand),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: op.span },
                span,
            }));
        }
        self.parse_power()
    }

    /// Parses a primary, optionally raised to a power.
    fn parse_power(&mut self) -> Result<Expr, Error> {
        let base = self.parse_primary()?;
        match self.eat(TokenKind::Exp) {
            Some(op) => {
                let exponent = self.parse_unary()?;
                Ok(binary(base, BinOp { kind: BinOpKind::Exp, implicit: false, span: op.span }, exponent))
            },
            None => Ok(base),
        }
    }

    /// Parses a literal, function call, or parenthesized expression.
    fn parse_primary(&mut self) -> Result<Expr, Error> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Int => Ok(Expr::Literal(Literal::Integer(LitInt {
                value: token.lexeme.to_owned(),
                span: token.span,
            }))),
            TokenKind::Float => Ok(Expr::Literal(Literal::Float(LitFloat {
                value: token.lexeme.to_owned(),
                span: token.span,
            }))),
            TokenKind::Name => {
                let name = LitSym { name: token.lexeme.to_owned(), span: token.span };
                match self.eat(TokenKind::OpenParen) {
                    Some(open) => self.parse_call(name, open),
                    None => Ok(Expr::Literal(Literal::Symbol(name))),
                }
            },
            TokenKind::OpenParen => {
                let expr = self.parse_expr()?;
                let close = self.expect_close(&token)?;
                Ok(Expr::Paren(Paren {
                    expr: Box::new(expr),
                    span: token.span.start..close.span.end,
                }))
            },
            found => {
                self.cursor -= 1;
                Err(self.error(UnexpectedToken { expected: OPERAND_START, found }))
            },
        }
    }

    /// Parses the arguments of a function call, after its opening parenthesis.
    fn parse_call(&mut self, name: LitSym, open: Token<'source>) -> Result<Expr, Error> {
        let mut args = Vec::new();
        if let Some(close) = self.eat(TokenKind::CloseParen) {
            return Ok(call(name, args, open.span.start..close.span.end));
        }

        loop {
            args.push(self.parse_expr()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        let close = self.expect_close(&open)?;
        Ok(call(name, args, open.span.start..close.span.end))
    }

    /// Consumes the closing parenthesis matching `open`.
    fn expect_close(&mut self, open: &Token<'source>) -> Result<Token<'source>, Error> {
        match self.peek_token().map(|token| token.kind) {
            Some(TokenKind::CloseParen) => self.next_token(),
            None => Err(Error::new(vec![open.span.clone()], UnclosedParenthesis)),
            Some(found) => Err(self.error(UnexpectedToken {
                expected: &[TokenKind::CloseParen, TokenKind::Comma],
                found,
            })),
        }
    }
}

/// Joins two operands with the given operator.
fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
    let span = lhs.span().start..rhs.span().end;
    Expr::Binary(Binary { lhs: Box::new(lhs), op, rhs: Box::new(rhs), span })
}

/// Builds a call node spanning from the function name to the closing parenthesis.
fn call(name: LitSym, args: Vec<Expr>, paren_span: Range<usize>) -> Expr {
    let span = name.span.start..paren_span.end;
    Expr::Call(Call { name, args, span, paren_span })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full().unwrap()
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), int("16", 0..2));
    }

    #[test]
    fn precedence() {
        let expr = parse("1 + 2 * x");
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("1", 0..1)),
            op: BinOp { kind: BinOpKind::Add, implicit: false, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 6..7 },
                rhs: Box::new(sym("x", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse("3x");
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("3", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(sym("x", 1..2)),
            span: 0..2,
        }));
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(parse("x^2^3").to_string(), "x^2^3");
        let Expr::Binary(outer) = parse("x^2^3") else {
            panic!("expected a binary expression");
        };
        assert_eq!(*outer.lhs, sym("x", 0..1));
        assert!(matches!(*outer.rhs, Expr::Binary(Binary { op: BinOp { kind: BinOpKind::Exp, .. }, .. })));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        let Expr::Unary(unary) = parse("-x^2") else {
            panic!("expected a unary expression");
        };
        assert!(matches!(*unary.operand, Expr::Binary(Binary { op: BinOp { kind: BinOpKind::Exp, .. }, .. })));
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(parse("(1 + x)^-2").to_string(), "(1 + x)^-2");
    }

    #[test]
    fn call_with_arguments() {
        let Expr::Call(call) = parse("series(sin(x), x, 8)") else {
            panic!("expected a call");
        };
        assert_eq!(call.name.name, "series");
        assert_eq!(call.args.len(), 3);
        assert_eq!(call.span, 0..20);
        assert_eq!(call.args[0].to_string(), "sin(x)");
    }

    #[test]
    fn empty_call() {
        let Expr::Call(call) = parse("f()") else {
            panic!("expected a call");
        };
        assert!(call.args.is_empty());
    }

    #[test]
    fn display_round_trip() {
        for source in ["sin(x)cos(x)", "2x^2 + sin(x)", "1 / (1 - x)", "exp(x) * 0.5"] {
            assert_eq!(parse(source).to_string(), source);
        }
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = Parser::new("(x + 1").try_parse_full().unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn trailing_garbage() {
        let err = Parser::new("x + 1 )").try_parse_full().unwrap_err();
        assert_eq!(err.spans, vec![6..7]);
    }

    #[test]
    fn unexpected_eof() {
        let err = Parser::new("x +").try_parse_full().unwrap_err();
        assert_eq!(err.spans, vec![3..3]);
    }

    #[test]
    fn unexpected_token() {
        let err = Parser::new("x + *").try_parse_full().unwrap_err();
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn unrecognized_symbol_report() {
        let err = Parser::new("x + #").try_parse_full().unwrap_err();
        assert_eq!(err.spans, vec![4..5]);

        let report = String::from_utf8(strip_ansi_escapes::strip(err.report_to_string("x + #"))).unwrap();
        assert!(report.contains("unexpected token"));
        assert!(report.contains("expected one of: Name, Int, Float, OpenParen"));
        assert!(report.contains("found Symbol"));
    }
}
