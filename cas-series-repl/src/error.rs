use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::EXPR;

/// A call to `series` with the wrong arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid call to `series`",
    labels = [self.label()],
    help = format!("the call should look like: {}", "series(sin(x), x, 6)".fg(EXPR)),
)]
pub enum InvalidSeriesCall {
    /// The call did not have exactly three arguments.
    ArgumentCount(usize),

    /// The second argument was not a variable name.
    NotAVariable,

    /// The third argument was not a nonnegative integer.
    NotAnOrder,
}

impl InvalidSeriesCall {
    fn label(&self) -> String {
        match self {
            Self::ArgumentCount(n) => format!("expected 3 arguments, found {}", n),
            Self::NotAVariable => "this should be the name of the expansion variable".to_string(),
            Self::NotAnOrder => "this should be the truncation order, such as `6`".to_string(),
        }
    }
}
