//! Character-class checks and numeric-token location.
//!
//! The engine edits numbers in place (sign toggle, percent, decimal point),
//! so it needs a precise notion of "the number at the end of the
//! expression". The rules live here so they can be tested at their
//! boundaries in isolation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches any character the evaluator refuses to look at.
    static ref DISALLOWED_CHAR: Regex = Regex::new(r"[^0-9+\-*/(). ]").unwrap();
}

/// Binary operator characters.
pub const OPERATORS: &[char] = &['+', '-', '*', '/'];

/// Returns the first character the evaluator does not accept, if any.
pub fn find_disallowed_char(input: &str) -> Option<char> {
    DISALLOWED_CHAR
        .find(input)
        .and_then(|m| m.as_str().chars().next())
}

/// Check if `c` is one of `+ - * /`.
pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Characters that delimit a number run.
fn is_delimiter(c: char) -> bool {
    is_operator(c) || c == '(' || c == ')'
}

/// The text after the last operator or parenthesis.
///
/// This is the number currently being typed; it is empty right after an
/// operator, a parenthesis, or on an empty expression.
pub fn current_number_run(expression: &str) -> &str {
    match expression.rfind(is_delimiter) {
        Some(idx) => &expression[idx + 1..],
        None => expression,
    }
}

/// Location of the trailing numeric token inside an expression.
///
/// Byte offsets; the expression alphabet is ASCII so they are also
/// character offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberToken {
    /// Start of the token, including a unary sign when present.
    pub start: usize,
    /// Start of the unsigned digits.
    pub digits_start: usize,
    /// One past the last digit.
    pub end: usize,
}

impl NumberToken {
    /// The unary sign attached to the token, if any.
    pub fn sign(&self, expression: &str) -> Option<char> {
        if self.start == self.digits_start {
            None
        } else {
            expression[self.start..].chars().next()
        }
    }

    /// The token text including its sign.
    #[cfg(test)]
    pub fn as_str<'a>(&self, expression: &'a str) -> &'a str {
        &expression[self.start..self.end]
    }

    /// The token text without its sign.
    pub fn unsigned<'a>(&self, expression: &'a str) -> &'a str {
        &expression[self.digits_start..self.end]
    }
}

/// Find the last number in the expression.
///
/// The token ends at the last digit and extends left over digits and at
/// most one `.` that is followed by a digit. A `+`/`-` right before it is
/// part of the token only when it is unary: at the start of the expression
/// or directly after an operator or `(`. In `1-5` the `-` is binary and the
/// token is `5`; in `1*-5` it is `-5`.
pub fn trailing_number(expression: &str) -> Option<NumberToken> {
    let bytes = expression.as_bytes();
    let end = bytes.iter().rposition(u8::is_ascii_digit)? + 1;

    let mut digits_start = end;
    let mut seen_dot = false;
    while digits_start > 0 {
        let b = bytes[digits_start - 1];
        if b.is_ascii_digit() {
            digits_start -= 1;
        } else if b == b'.' && !seen_dot {
            seen_dot = true;
            digits_start -= 1;
        } else {
            break;
        }
    }

    let mut start = digits_start;
    if digits_start > 0 {
        let sign = bytes[digits_start - 1];
        if sign == b'+' || sign == b'-' {
            let unary = match digits_start.checked_sub(2).map(|i| bytes[i] as char) {
                None => true,
                Some(prev) => is_operator(prev) || prev == '(',
            };
            if unary {
                start = digits_start - 1;
            }
        }
    }

    Some(NumberToken {
        start,
        digits_start,
        end,
    })
}

/// The unsigned number that ends the expression, if the expression ends
/// with a digit.
pub fn trailing_unsigned_number(expression: &str) -> Option<NumberToken> {
    trailing_number(expression).filter(|token| token.end == expression.len())
}
