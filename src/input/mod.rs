mod action;
mod keys;

pub use action::Action;
pub use keys::{KEY_LEGEND, from_key};

use crate::calculator::Operator;
use thiserror::Error;

/// Errors raised while mapping user input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("unknown button: {0:?}")]
    UnknownButton(String),
}

/// One user input the calculator can react to.
/// Buttons and keys both map onto this before reaching the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// A digit or decimal point
    Digit(char),
    /// A binary operator
    Operator(Operator),
    /// A named action button
    Action(Action),
    /// A raw `(` key, bypassing the parenthesis toggle
    OpenParen,
    /// A raw `)` key
    CloseParen,
}

impl Input {
    /// Parse a button token: a digit, `.`, an operator symbol, or an action
    /// name such as `square-root` or `sqrt`.
    pub fn from_button(token: &str) -> Result<Self, InputError> {
        let trimmed = token.trim();
        let mut chars = trimmed.chars();

        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_digit() || c == '.' {
                return Ok(Self::Digit(c));
            }
            if let Some(op) = Operator::from_char(c) {
                return Ok(Self::Operator(op));
            }
        }

        trimmed.parse::<Action>().map(Self::Action)
    }
}

// Convenient From implementations

impl From<Operator> for Input {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<Action> for Input {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_buttons() {
        assert_eq!(Input::from_button("7").unwrap(), Input::Digit('7'));
        assert_eq!(Input::from_button(".").unwrap(), Input::Digit('.'));
    }

    #[test]
    fn test_operator_buttons() {
        assert_eq!(
            Input::from_button("*").unwrap(),
            Input::Operator(Operator::Multiply)
        );
        assert_eq!(
            Input::from_button(" - ").unwrap(),
            Input::Operator(Operator::Subtract)
        );
    }

    #[test]
    fn test_action_buttons() {
        assert_eq!(
            Input::from_button("percent").unwrap(),
            Input::Action(Action::Percent)
        );
        assert_eq!(
            Input::from_button("%").unwrap(),
            Input::Action(Action::Percent)
        );
        assert_eq!(
            Input::from_button("=").unwrap(),
            Input::Action(Action::Equals)
        );
        assert_eq!(
            Input::from_button("del").unwrap(),
            Input::Action(Action::Delete)
        );
    }

    #[test]
    fn test_unknown_buttons() {
        assert!(Input::from_button("12").is_err());
        assert!(Input::from_button("(").is_err());
        assert!(Input::from_button("").is_err());
    }
}
