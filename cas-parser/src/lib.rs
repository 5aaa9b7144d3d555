//! Tokenizer and parser for mathematical expressions such as `sin(x) * cos(x)` or `(1 + x)^(1/2)`.
//!
//! The parser produces an [`ast::Expr`](parser::ast::Expr) tree that keeps the span of every
//! node, so that later stages can report errors pointing at the exact region of the input that
//! caused them.
//!
//! ```
//! use cas_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("2x^2 + sin(x)").try_parse_full().unwrap();
//! assert!(matches!(expr, Expr::Binary(_)));
//! assert_eq!(expr.to_string(), "2x^2 + sin(x)");
//! ```

pub mod parser;
pub mod tokenizer;
