//! The closed set of named functions known to the symbolic expression model.

use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt};

/// A named, single-argument function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Asin,
    Acos,
    Asinh,
    Acosh,
    Atan,
    Atanh,
    Abs,
}

/// Every known function, in declaration order.
pub const ALL: [Func; 15] = [
    Func::Exp,
    Func::Log,
    Func::Sin,
    Func::Cos,
    Func::Tan,
    Func::Sinh,
    Func::Cosh,
    Func::Tanh,
    Func::Asin,
    Func::Acos,
    Func::Asinh,
    Func::Acosh,
    Func::Atan,
    Func::Atanh,
    Func::Abs,
];

/// Maps function names (and aliases) to the function they name.
static BY_NAME: Lazy<HashMap<&'static str, Func>> = Lazy::new(|| {
    ALL.iter()
        .map(|func| (func.name(), *func))
        .chain([("ln", Func::Log)])
        .collect()
});

impl Func {
    /// Returns the canonical name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Asinh => "asinh",
            Func::Acosh => "acosh",
            Func::Atan => "atan",
            Func::Atanh => "atanh",
            Func::Abs => "abs",
        }
    }

    /// Looks up a function by name. `ln` is accepted as an alias of `log`.
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for func in ALL {
            assert_eq!(Func::from_name(func.name()), Some(func));
        }
    }

    #[test]
    fn alias() {
        assert_eq!(Func::from_name("ln"), Some(Func::Log));
        assert_eq!(Func::from_name("sqrt"), None);
        assert_eq!(Func::from_name("gamma"), None);
    }
}
