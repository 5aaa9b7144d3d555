//! Symbolic representation of the expressions handed to the series expander.
//!
//! Expressions are represented as a tree of [`SymExpr`] nodes, built from the AST produced by
//! [`cas_parser`] with the [`From`] trait. See the [`expr`] module for details.

pub mod expr;
pub mod func;
pub mod number;

pub use expr::{Constant, SymExpr};
pub use func::Func;
pub use number::Number;
