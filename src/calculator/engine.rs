//! The expression engine behind the calculator widget.
//!
//! Owns the running expression and the little bit of state derived from it,
//! and applies one user input at a time. Every operation is total: invalid
//! input is ignored silently and leaves both expression and readout as they
//! were.

use super::detection::{
    current_number_run, is_operator, trailing_number, trailing_unsigned_number,
};
use super::evaluation::{CalcResult, Evaluator, format_number};
use std::fmt;
use tracing::{debug, trace};

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// The character this operator is written as in an expression.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == c)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The kind of the most recent committed input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LastInput {
    #[default]
    None,
    /// A digit or decimal point.
    Digit,
    Operator,
    /// A committed result (`=`).
    Equals,
}

/// Builds and evaluates a calculator expression one input at a time.
#[derive(Clone, Debug)]
pub struct ExpressionEngine {
    expression: String,
    /// Unmatched `(` count.
    open_parens: usize,
    last_was_operator: bool,
    last_input: LastInput,
    /// What the display currently shows.
    readout: String,
    evaluator: Evaluator,
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new(Evaluator::default())
    }
}

impl ExpressionEngine {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            expression: String::new(),
            open_parens: 0,
            last_was_operator: false,
            last_input: LastInput::None,
            readout: "0".to_string(),
            evaluator,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn open_parens(&self) -> usize {
        self.open_parens
    }

    pub fn last_was_operator(&self) -> bool {
        self.last_was_operator
    }

    pub fn last_input(&self) -> LastInput {
        self.last_input
    }

    /// The text the display should show.
    pub fn render(&self) -> &str {
        &self.readout
    }

    /// Append a digit or `.` to the number being typed.
    ///
    /// After a committed result this starts a new expression. A second `.`
    /// in the same number is ignored; a `.` that starts a number gets a
    /// leading `0`.
    pub fn append_digit_or_dot(&mut self, ch: char) {
        if !(ch.is_ascii_digit() || ch == '.') {
            debug!(?ch, "ignoring non-digit input");
            return;
        }

        if self.last_input == LastInput::Equals {
            self.reset_expression();
        }

        if ch == '.' {
            let run = current_number_run(&self.expression);
            if run.contains('.') {
                return;
            }
            if run.is_empty() {
                self.expression.push('0');
            }
        }

        self.expression.push(ch);
        self.last_was_operator = false;
        self.last_input = LastInput::Digit;
        self.refresh("digit");
    }

    /// Append a binary operator, or replace the one the expression ends with.
    pub fn append_operator(&mut self, op: Operator) {
        let symbol = op.symbol();

        // Only a unary minus may start an expression or a group
        if self.expression.is_empty() || self.expression.ends_with('(') {
            if op != Operator::Subtract {
                return;
            }
            self.expression.push(symbol);
        } else if self.last_was_operator && self.expression.ends_with(is_operator) {
            let len = self.expression.len();
            let unary = len == 1 || self.expression[..len - 1].ends_with('(');
            if unary && op != Operator::Subtract {
                return;
            }
            self.expression.pop();
            self.expression.push(symbol);
        } else {
            self.expression.push(symbol);
        }

        self.last_was_operator = true;
        self.last_input = LastInput::Operator;
        self.refresh("operator");
    }

    /// Flip the sign of the last number in the expression.
    pub fn toggle_sign(&mut self) {
        let Some(token) = trailing_number(&self.expression) else {
            return;
        };

        let digits = token.unsigned(&self.expression);
        let toggled = match token.sign(&self.expression) {
            Some('-') => digits.to_string(),
            _ => format!("-{digits}"),
        };

        self.expression
            .replace_range(token.start..token.end, &toggled);
        self.refresh("toggle sign");
    }

    /// Remove the last character.
    pub fn backspace(&mut self) {
        if self.expression.pop().is_none() {
            return;
        }
        self.recompute_derived();
        self.refresh("backspace");
    }

    /// Reset to an empty expression.
    pub fn clear_all(&mut self) {
        self.reset_expression();
        self.last_input = LastInput::None;
        self.refresh("clear");
    }

    /// The on-screen parenthesis key: opens or closes depending on context.
    pub fn toggle_parenthesis(&mut self) {
        if self.open_parens == 0 || self.expression.ends_with('(') || self.last_was_operator {
            self.push_open_paren();
        } else {
            self.push_close_paren();
        }
        self.refresh("parenthesis");
    }

    /// Append `(` without applying the toggle policy.
    pub fn open_paren(&mut self) {
        self.push_open_paren();
        self.refresh("open paren");
    }

    /// Append `)` without applying the toggle policy.
    pub fn close_paren(&mut self) {
        self.push_close_paren();
        self.refresh("close paren");
    }

    /// Replace the trailing number with a hundredth of its value.
    pub fn percent(&mut self) {
        let Some(token) = trailing_unsigned_number(&self.expression) else {
            return;
        };
        let Ok(value) = token.unsigned(&self.expression).parse::<f64>() else {
            return;
        };
        // Digit runs past f64 range parse as infinity
        if !value.is_finite() {
            return;
        }

        let replaced = format_number(value / 100.0);
        self.expression
            .replace_range(token.digits_start..token.end, &replaced);
        self.refresh("percent");
    }

    /// Replace the expression with the square root of its value.
    pub fn square_root(&mut self) {
        let Some(value) = self.evaluate_current() else {
            return;
        };
        if value < 0.0 {
            self.fail("square root of a negative number");
            return;
        }
        self.replace_with_result(value.sqrt(), "square root");
    }

    /// Replace the expression with the square of its value.
    pub fn square(&mut self) {
        let Some(value) = self.evaluate_current() else {
            return;
        };
        let squared = value * value;
        if !squared.is_finite() {
            self.fail("square overflowed");
            return;
        }
        self.replace_with_result(squared, "square");
    }

    /// Evaluate the expression (`=`), closing any open parentheses first.
    pub fn commit(&mut self) {
        if self.expression.is_empty() {
            return;
        }

        for _ in 0..self.open_parens {
            self.expression.push(')');
        }
        self.open_parens = 0;

        match self.evaluator.evaluate(&self.expression) {
            CalcResult::Success { display_result, .. } => {
                self.expression = display_result;
                self.last_was_operator = false;
                self.last_input = LastInput::Equals;
                self.refresh("commit");
            }
            CalcResult::Error { .. } => self.fail("commit"),
        }
    }

    fn evaluate_current(&self) -> Option<f64> {
        if self.expression.is_empty() {
            return None;
        }
        match self.evaluator.try_evaluate(&self.expression) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(
                    expression = %self.expression,
                    error = %err,
                    "ignoring input on unevaluable expression"
                );
                None
            }
        }
    }

    fn replace_with_result(&mut self, value: f64, what: &str) {
        self.expression = format_number(value);
        self.open_parens = 0;
        self.last_was_operator = false;
        self.refresh(what);
    }

    /// Show the error marker and start over.
    fn fail(&mut self, reason: &str) {
        debug!(expression = %self.expression, reason, "showing error marker");
        self.reset_expression();
        self.last_input = LastInput::Equals;
        self.readout = self.evaluator.error_marker().to_string();
    }

    fn push_open_paren(&mut self) {
        self.expression.push('(');
        self.open_parens += 1;
        self.last_was_operator = true;
    }

    fn push_close_paren(&mut self) {
        self.expression.push(')');
        self.open_parens = self.open_parens.saturating_sub(1);
        self.last_was_operator = false;
    }

    fn reset_expression(&mut self) {
        self.expression.clear();
        self.open_parens = 0;
        self.last_was_operator = false;
    }

    /// Rebuild paren count and operator flag from the text.
    fn recompute_derived(&mut self) {
        self.open_parens = self.expression.chars().fold(0usize, |open, c| match c {
            '(' => open + 1,
            ')' => open.saturating_sub(1),
            _ => open,
        });
        self.last_was_operator = self
            .expression
            .ends_with(|c: char| is_operator(c) || c == '(');
    }

    fn refresh(&mut self, what: &str) {
        self.readout = if self.expression.is_empty() {
            "0".to_string()
        } else {
            self.expression.clone()
        };
        trace!(
            op = what,
            expression = %self.expression,
            open_parens = self.open_parens,
            "engine updated"
        );
    }
}
