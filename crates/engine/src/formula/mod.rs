// Amount expressions: coordinate substitution and arithmetic evaluation

pub mod eval;
pub mod parser;

pub use eval::{evaluate, evaluate_in};
pub use parser::compile;

use std::fmt;

/// Failure to evaluate a compiled amount expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Input ended where a number or `(` was expected.
    UnexpectedEnd,
    /// A character outside the grammar (letters, `^`, ...).
    UnexpectedCharacter(char),
    /// A token where a number or `(` was expected.
    UnexpectedToken(String),
    /// A run of digits and dots that is not a number (e.g. `1..2`).
    InvalidNumber(String),
    /// `(` without a matching `)`.
    UnclosedParenthesis,
    /// Tokens left over after a complete expression.
    TrailingInput(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => write!(f, "unexpected end of expression"),
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'"),
            Self::UnexpectedToken(t) => write!(f, "unexpected token '{t}'"),
            Self::InvalidNumber(n) => write!(f, "invalid number '{n}'"),
            Self::UnclosedParenthesis => write!(f, "missing closing parenthesis"),
            Self::TrailingInput(rest) => write!(f, "unexpected trailing input '{rest}'"),
        }
    }
}

impl std::error::Error for EvalError {}
