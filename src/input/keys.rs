//! Keyboard mapping.
//!
//! Physical keys follow the usual calculator layout: digits and operators
//! type themselves, Enter or `=` commits, Backspace deletes, Escape clears.
//! `(` and `)` append directly. Letters stand in for the keypad-only
//! buttons so every action is reachable from the keyboard.

use super::{Action, Input};
use crate::calculator::Operator;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key legend shown under the display, as (key, meaning) pairs.
pub const KEY_LEGEND: &[(&str, &str)] = &[
    ("Enter/=", "equals"),
    ("Bksp", "delete"),
    ("Del", "clear entry"),
    ("Esc", "clear all"),
    ("p", "( )"),
    ("n", "+/-"),
    ("%", "percent"),
    ("r", "√"),
    ("s", "x²"),
    ("q", "quit"),
];

/// Map a key event to a calculator input.
///
/// Returns `None` for key releases, modified keys (other than Shift) and
/// keys with no binding.
pub fn from_key(key: KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    let input: Input = match key.code {
        KeyCode::Char(c @ ('0'..='9' | '.')) => Input::Digit(c),
        KeyCode::Char('(') => Input::OpenParen,
        KeyCode::Char(')') => Input::CloseParen,
        KeyCode::Char('=') | KeyCode::Enter => Action::Equals.into(),
        KeyCode::Char('%') => Action::Percent.into(),
        KeyCode::Char('p' | 'P') => Action::Parenthesis.into(),
        KeyCode::Char('n' | 'N') => Action::ToggleSign.into(),
        KeyCode::Char('r' | 'R') => Action::SquareRoot.into(),
        KeyCode::Char('s' | 'S') => Action::Square.into(),
        KeyCode::Char(c) => Operator::from_char(c)?.into(),
        KeyCode::Backspace => Action::Delete.into(),
        KeyCode::Delete => Action::ClearEntry.into(),
        KeyCode::Esc => Action::ClearAll.into(),
        _ => return None,
    };

    Some(input)
}
