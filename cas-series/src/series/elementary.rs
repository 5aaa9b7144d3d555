//! The elementary functions supported by the fast path, with the constant term each one
//! requires of its argument.

use crate::symbolic::Func;
use rug::Rational;
use std::fmt;
use super::ratser::RatSeries;

/// The constant term an elementary function requires its argument's series to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantTerm {
    /// The argument must vanish at the origin.
    Zero,

    /// The argument must be exactly one at the origin.
    One,
}

impl ConstantTerm {
    /// Returns true if the given coefficient satisfies this requirement.
    pub fn holds(self, c0: &Rational) -> bool {
        match self {
            Self::Zero => *c0 == 0,
            Self::One => *c0 == 1,
        }
    }
}

impl fmt::Display for ConstantTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "0"),
            Self::One => write!(f, "1"),
        }
    }
}

/// An elementary function that can be composed with a truncated series.
#[derive(Debug)]
pub struct Elementary {
    /// The function.
    pub func: Func,

    /// The constant term required of the argument.
    pub requires: ConstantTerm,

    /// Composes the function with a series whose constant term satisfies
    /// [`Elementary::requires`].
    pub apply: fn(&RatSeries) -> RatSeries,
}

/// The supported elementary functions.
pub static ELEMENTARY: [Elementary; 12] = [
    Elementary { func: Func::Exp, requires: ConstantTerm::Zero, apply: RatSeries::exp },
    Elementary { func: Func::Log, requires: ConstantTerm::One, apply: RatSeries::log },
    Elementary { func: Func::Sin, requires: ConstantTerm::Zero, apply: RatSeries::sin },
    Elementary { func: Func::Cos, requires: ConstantTerm::Zero, apply: RatSeries::cos },
    Elementary { func: Func::Tan, requires: ConstantTerm::Zero, apply: RatSeries::tan },
    Elementary { func: Func::Sinh, requires: ConstantTerm::Zero, apply: RatSeries::sinh },
    Elementary { func: Func::Cosh, requires: ConstantTerm::Zero, apply: RatSeries::cosh },
    Elementary { func: Func::Tanh, requires: ConstantTerm::Zero, apply: RatSeries::tanh },
    Elementary { func: Func::Asin, requires: ConstantTerm::Zero, apply: RatSeries::asin },
    Elementary { func: Func::Asinh, requires: ConstantTerm::Zero, apply: RatSeries::asinh },
    Elementary { func: Func::Atan, requires: ConstantTerm::Zero, apply: RatSeries::atan },
    Elementary { func: Func::Atanh, requires: ConstantTerm::Zero, apply: RatSeries::atanh },
];

/// Returns the table entry for the given function, or [`None`] if the fast path does not support
/// it.
pub fn lookup(func: Func) -> Option<&'static Elementary> {
    ELEMENTARY.iter().find(|entry| entry.func == func)
}

#[cfg(test)]
mod tests {
    use crate::{primitive::rat, symbolic::func::ALL};
    use super::*;

    #[test]
    fn whitelist() {
        let supported = ALL.iter().filter(|func| lookup(**func).is_some()).count();
        assert_eq!(supported, 12);
        assert!(lookup(Func::Acos).is_none());
        assert!(lookup(Func::Acosh).is_none());
        assert!(lookup(Func::Abs).is_none());
    }

    #[test]
    fn only_log_requires_one() {
        for entry in &ELEMENTARY {
            let expected = if entry.func == Func::Log { ConstantTerm::One } else { ConstantTerm::Zero };
            assert_eq!(entry.requires, expected, "{}", entry.func);
        }
    }

    #[test]
    fn requirement_check() {
        assert!(ConstantTerm::Zero.holds(&rat(0)));
        assert!(!ConstantTerm::Zero.holds(&rat((1, 2))));
        assert!(ConstantTerm::One.holds(&rat(1)));
        assert!(!ConstantTerm::One.holds(&rat(0)));
    }
}
