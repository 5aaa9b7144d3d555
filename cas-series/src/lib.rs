//! Fast truncated power series expansion of univariate expressions with exact rational
//! coefficients.
//!
//! The [`series`] module expands an expression such as `sin(x) * cos(x)` about `x = 0` into a
//! truncated [`PowerSeries`](series::PowerSeries), or reports that it cannot, in which case the
//! caller should fall back to a general (slower) series algorithm. Expressions are represented
//! with the [`symbolic`] module, and are usually built from the output of [`cas_parser`].
//!
//! ```
//! use cas_parser::parser::Parser;
//! use cas_series::{series::{useries, Relation}, symbolic::SymExpr};
//!
//! let expr = SymExpr::from(Parser::new("sin(x) * cos(x)").try_parse_full().unwrap());
//! let series = useries(&expr, &Relation::at_zero("x"), 4).unwrap();
//! assert_eq!(series.to_string(), "x - 2/3*x^3 + O(x^4)");
//! ```

pub mod primitive;
pub mod series;
pub mod symbolic;
