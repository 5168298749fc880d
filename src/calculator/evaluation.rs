//! Expression evaluation.
//!
//! A small recursive-descent evaluator over the calculator alphabet
//! (`0-9 . + - * / ( )` and spaces). Input is normalized first, then parsed
//! and computed in one pass; no tree is built.

use super::detection::find_disallowed_char;
use super::error::{EvalError, Result};
use serde::Serialize;
use tracing::debug;

/// Text shown when an expression cannot be evaluated.
pub const DEFAULT_ERROR_MARKER: &str = "Error";

/// Decimal places committed results are rounded to.
pub const DEFAULT_DECIMAL_PLACES: u32 = 10;

/// Parenthesis depth past which evaluation gives up.
const MAX_DEPTH: usize = 256;

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalcResult {
    /// Successful calculation with a finite, rounded value.
    Success {
        /// The expression as given to the evaluator.
        expression: String,
        /// The rounded numeric value.
        value: f64,
        /// The value formatted for display.
        display_result: String,
    },
    /// The expression could not be evaluated.
    Error {
        /// The expression as given to the evaluator.
        expression: String,
        /// The error marker to display.
        message: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error marker).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the numeric value (only for successful results).
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluates expressions with a fixed error marker and rounding.
#[derive(Clone, Debug)]
pub struct Evaluator {
    error_marker: String,
    decimal_places: u32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_MARKER, DEFAULT_DECIMAL_PLACES)
    }
}

impl Evaluator {
    pub fn new(error_marker: impl Into<String>, decimal_places: u32) -> Self {
        Self {
            error_marker: error_marker.into(),
            decimal_places,
        }
    }

    pub fn error_marker(&self) -> &str {
        &self.error_marker
    }

    /// Evaluate an expression, collapsing every failure into the error marker.
    pub fn evaluate(&self, input: &str) -> CalcResult {
        let expression = input.to_string();

        match self.try_evaluate(input) {
            Ok(value) => CalcResult::Success {
                display_result: format_number(value),
                expression,
                value,
            },
            Err(err) => {
                debug!(expression = %input, error = %err, "evaluation failed");
                CalcResult::Error {
                    expression,
                    message: self.error_marker.clone(),
                }
            }
        }
    }

    /// Evaluate an expression and keep the failure cause.
    pub fn try_evaluate(&self, input: &str) -> Result<f64> {
        let processed = normalize(input);

        if let Some(c) = find_disallowed_char(&processed) {
            return Err(EvalError::DisallowedChar(c));
        }

        let value = Parser::new(&processed).parse()?;
        if !value.is_finite() {
            return Err(EvalError::NonFinite);
        }

        Ok(round_to(value, self.decimal_places))
    }
}

/// Evaluate an expression with the default marker and rounding.
pub fn evaluate_expression(input: &str) -> CalcResult {
    Evaluator::default().evaluate(input)
}

/// Rewrite `%` as division by 100 and collapse doubled signs.
///
/// The sign collapse is a single left-to-right pass per pattern, so
/// `-+-` becomes `--` and stays that way.
fn normalize(input: &str) -> String {
    input
        .replace('%', "/100")
        .replace("--", "+")
        .replace("+-", "-")
        .replace("-+", "-")
        .replace("++", "+")
}

/// Round half away from zero to `places` decimals.
///
/// An epsilon nudge absorbs representation error such as `1.005`.
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = (value + f64::EPSILON) * factor;
    if !scaled.is_finite() {
        // Too large to carry fractional digits anyway
        return value;
    }
    scaled.round() / factor
}

/// Format a number the way the display shows it.
///
/// Shortest round-trip decimal form, never exponent notation, and no
/// negative zero.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            src: text.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<f64> {
        let value = self.expr()?;
        self.skip_whitespace();
        if self.pos < self.src.len() {
            return Err(EvalError::TrailingInput(self.pos));
        }
        Ok(value)
    }

    fn skip_whitespace(&mut self) {
        while self.src.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.src.get(self.pos).copied()
    }

    fn unexpected(&self) -> EvalError {
        match self.src.get(self.pos) {
            Some(&b) => EvalError::UnexpectedChar {
                found: b as char,
                offset: self.pos,
            },
            None => EvalError::UnexpectedEnd,
        }
    }

    /// expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64> {
        let mut acc = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == b'+' {
                acc += rhs;
            } else {
                acc -= rhs;
            }
        }
        Ok(acc)
    }

    /// term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64> {
        let mut acc = self.unary()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            if op == b'*' {
                acc *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                acc /= rhs;
            }
        }
        Ok(acc)
    }

    /// unary := ('+' | '-')* primary
    fn unary(&mut self) -> Result<f64> {
        let mut negate = false;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            if op == b'-' {
                negate = !negate;
            }
        }
        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    /// primary := number | '(' expr ')'
    fn primary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(b'(') => {
                self.depth += 1;
                if self.depth > MAX_DEPTH {
                    return Err(EvalError::NestingTooDeep(MAX_DEPTH));
                }
                self.pos += 1;
                let value = self.expr()?;
                if self.peek() != Some(b')') {
                    return Err(self.unexpected());
                }
                self.pos += 1;
                self.depth -= 1;
                Ok(value)
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            _ => Err(self.unexpected()),
        }
    }

    /// number := digits ['.' digits] | '.' digits | digits '.'
    fn number(&mut self) -> Result<f64> {
        let start = self.pos;
        let mut digits = 0;
        let mut seen_dot = false;

        while let Some(&b) = self.src.get(self.pos) {
            if b.is_ascii_digit() {
                digits += 1;
            } else if b == b'.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
            self.pos += 1;
        }

        // The slice is ASCII digits and at most one dot
        let literal = std::str::from_utf8(&self.src[start..self.pos])
            .map_err(|_| EvalError::InvalidNumber(String::new()))?;
        if digits == 0 {
            return Err(EvalError::InvalidNumber(literal.to_string()));
        }

        let mut normalized = String::with_capacity(literal.len() + 1);
        if literal.starts_with('.') {
            normalized.push('0');
        }
        normalized.push_str(literal.strip_suffix('.').unwrap_or(literal));

        normalized
            .parse()
            .map_err(|_| EvalError::InvalidNumber(literal.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> String {
        evaluate_expression(input).display().to_string()
    }

    #[test]
    fn test_basic_evaluation() {
        let result = evaluate_expression("2 + 2");
        assert!(result.is_success());
        assert_eq!(result.display(), "4");
        assert_eq!(result.value(), Some(4.0));
        assert_eq!(result.expression(), "2 + 2");
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(eval("1+2*3"), "7");
        assert_eq!(eval("(1+2)*3"), "9");
        assert_eq!(eval("10-4-3"), "3");
        assert_eq!(eval("8/4/2"), "1");
        assert_eq!(eval("2*(3+(4-1))/3"), "4");
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(eval("-5+2"), "-3");
        assert_eq!(eval("3*-2"), "-6");
        assert_eq!(eval("-(2+3)"), "-5");
        assert_eq!(eval("+4"), "4");
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(eval(".5+.25"), "0.75");
        assert_eq!(eval("5.*2"), "10");
        assert_eq!(eval("0.1+0.2"), "0.3");
        assert_eq!(eval("1.2.3"), DEFAULT_ERROR_MARKER);
        assert_eq!(eval("."), DEFAULT_ERROR_MARKER);
    }

    #[test]
    fn test_percent_rewrite() {
        assert_eq!(eval("50%"), "0.5");
        assert_eq!(eval("200*10%"), "20");
    }

    #[test]
    fn test_sign_collapse() {
        assert_eq!(eval("5--3"), "8");
        assert_eq!(eval("5+-3"), "2");
        assert_eq!(eval("5-+3"), "2");
        assert_eq!(eval("5++3"), "8");
        // Single pass: "-+-" only becomes "--" and is parsed as a unary minus
        assert_eq!(normalize("1-+-2"), "1--2");
        assert_eq!(eval("1-+-2"), "3");
    }

    #[test]
    fn test_division_by_zero() {
        let result = evaluate_expression("5/0");
        assert!(!result.is_success());
        assert_eq!(result.display(), "Error");
        assert_eq!(
            Evaluator::default().try_evaluate("0/0"),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_rejects_disallowed_chars() {
        assert_eq!(
            Evaluator::default().try_evaluate("2^3"),
            Err(EvalError::DisallowedChar('^'))
        );
        assert_eq!(eval("Math.PI"), DEFAULT_ERROR_MARKER);
    }

    #[test]
    fn test_malformed_expressions() {
        for input in ["", "1+", "(1+2", "1+2)", "()", "2(3)", "**2", "2**3", "1 2"] {
            assert_eq!(eval(input), DEFAULT_ERROR_MARKER, "input {input:?}");
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let huge = format!("1{}*1{}", "0".repeat(200), "0".repeat(200));
        assert_eq!(
            Evaluator::default().try_evaluate(&huge),
            Err(EvalError::NonFinite)
        );
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        assert_eq!(
            Evaluator::default().try_evaluate(&deep),
            Err(EvalError::NestingTooDeep(MAX_DEPTH))
        );
        let ok = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(eval(&ok), "1");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(eval("1/3"), "0.3333333333");
        assert_eq!(eval("2/3"), "0.6666666667");
        assert_eq!(eval("1.005*1"), "1.005");
        let coarse = Evaluator::new("Error", 2);
        assert_eq!(coarse.evaluate("2/3").display(), "0.67");
    }

    #[test]
    fn test_custom_error_marker() {
        let evaluator = Evaluator::new("NaN!", 10);
        assert_eq!(evaluator.evaluate("1/0").display(), "NaN!");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.05), "0.05");
        assert_eq!(format_number(1e-7), "0.0000001");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(evaluate_expression("1+1")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["display_result"], "2");
        let json = serde_json::to_value(evaluate_expression("1/0")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Error");
    }
}
