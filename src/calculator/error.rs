//! Error types for expression evaluation.
//!
//! These never reach the display: every variant collapses into the
//! configured error marker. They exist so failures can be logged with a cause.

use thiserror::Error;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("disallowed character {0:?}")]
    DisallowedChar(char),

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("invalid number literal {0:?}")]
    InvalidNumber(String),

    #[error("parentheses nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, EvalError>;
