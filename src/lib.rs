//! zcalc - a keyboard-driven calculator widget.
//!
//! The [`calculator`] module holds the expression engine and evaluator,
//! [`input`] maps buttons and keys onto engine operations, and [`ui`] wires
//! an engine to a display surface.
//!
//! ```
//! use zcalc::calculator::ExpressionEngine;
//! use zcalc::input::Input;
//! use zcalc::ui::{Calculator, RecordingDisplay};
//!
//! let mut calc = Calculator::new(ExpressionEngine::default(), RecordingDisplay::new());
//! for button in ["1", "+", "2", "*", "3", "="] {
//!     calc.dispatch(Input::from_button(button).unwrap());
//! }
//! assert_eq!(calc.surface().current(), Some("7"));
//! ```

pub mod calculator;
pub mod config;
pub mod input;
pub mod ui;
