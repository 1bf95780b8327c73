//! Errors raised while composing patterns.
//!
//! Every error here is raised synchronously at the point of composition;
//! no partially built pattern is ever handed back alongside one. None of
//! them are retryable — they are deterministic construction mistakes whose
//! only resolution is correcting the call.

use std::fmt;

/// The reason a composition failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `start` does not precede `end` in code-point order.
    InvalidRange(char, char),
    /// A capturing-group or backreference name is not of the form
    /// `[A-Za-z_][A-Za-z0-9_]*`.
    InvalidGroupName(String),
    /// An n-ary operator received fewer operands than it requires.
    NotEnoughOperands { required: usize, provided: usize },
    /// Repetition bounds with `min > max`.
    InvalidRepeatBounds { min: u32, max: u32 },
    /// A repeating quantifier was applied to a non-repeatable pattern.
    CannotBeRepeated(String),
    /// Union of a regular class with a negated class.
    CannotBeUnioned,
    /// Subtraction between a regular class and a negated class.
    CannotBeSubtracted,
    /// A subtraction left no characters in the class.
    EmptyClass,
    /// Subtraction from the open-ended word class, which a finite
    /// subtraction cannot soundly narrow.
    GlobalWordClassSubtraction,
    /// Negation of the universal any-character class, which has no
    /// bracket form to negate.
    CannotBeNegated,
    /// A lookbehind assertion pattern does not have a fixed width.
    NonFixedWidthLookbehind(String),
    /// The empty pattern was supplied as a negative lookaround assertion.
    EmptyNegativeAssertion,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange(start, end) => {
                write!(f, "\"[{start}-{end}]\" is not a valid range")
            }
            Self::InvalidGroupName(name) => write!(
                f,
                "\"{name}\" is not a valid group name; a name must be a word-character \
                 sequence that starts with a non-digit"
            ),
            Self::NotEnoughOperands { required, provided } => write!(
                f,
                "operator requires at least {required} operand(s), but {provided} were provided"
            ),
            Self::InvalidRepeatBounds { min, max } => {
                write!(f, "repetition bounds {{{min},{max}}} have min greater than max")
            }
            Self::CannotBeRepeated(pattern) => {
                write!(f, "pattern \"{pattern}\" is non-repeatable")
            }
            Self::CannotBeUnioned => {
                write!(f, "classes and negated classes cannot be unioned together")
            }
            Self::CannotBeSubtracted => write!(
                f,
                "classes and negated classes cannot be subtracted from one another"
            ),
            Self::EmptyClass => write!(f, "subtraction results in an empty class"),
            Self::GlobalWordClassSubtraction => {
                write!(f, "cannot subtract from the open-ended word class")
            }
            Self::CannotBeNegated => {
                write!(f, "the universal any-character class cannot be negated")
            }
            Self::NonFixedWidthLookbehind(pattern) => write!(
                f,
                "pattern \"{pattern}\" does not have a fixed width and cannot be used \
                 as a lookbehind assertion"
            ),
            Self::EmptyNegativeAssertion => write!(
                f,
                "the empty pattern cannot be used as a negative lookaround assertion"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
