//! Calculator core.
//!
//! This module provides functionality to:
//! - Build an expression from digit, operator and action inputs
//! - Locate and rewrite the number at the end of an expression
//! - Evaluate expressions over the calculator alphabet

mod detection;
mod engine;
mod error;
mod evaluation;

pub use detection::{NumberToken, current_number_run, trailing_number};
pub use engine::{ExpressionEngine, LastInput, Operator};
pub use error::EvalError;
pub use evaluation::{
    CalcResult, DEFAULT_DECIMAL_PLACES, DEFAULT_ERROR_MARKER, Evaluator, evaluate_expression,
    format_number,
};
