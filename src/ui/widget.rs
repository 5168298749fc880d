//! The calculator widget: one engine wired to one display.

use super::display::DisplaySurface;
use crate::calculator::ExpressionEngine;
use crate::input::{Action, Input};
use tracing::trace;

/// Dispatches inputs to an [`ExpressionEngine`] and renders after each one.
pub struct Calculator<S: DisplaySurface> {
    engine: ExpressionEngine,
    surface: S,
}

impl<S: DisplaySurface> Calculator<S> {
    /// Create a widget and show the initial readout.
    pub fn new(engine: ExpressionEngine, mut surface: S) -> Self {
        surface.render(engine.render());
        Self { engine, surface }
    }

    /// Apply one input and re-render.
    pub fn dispatch(&mut self, input: Input) {
        trace!(?input, "dispatch");
        let engine = &mut self.engine;

        match input {
            Input::Digit(c) => engine.append_digit_or_dot(c),
            Input::Operator(op) => engine.append_operator(op),
            Input::OpenParen => engine.open_paren(),
            Input::CloseParen => engine.close_paren(),
            Input::Action(action) => match action {
                Action::ClearEntry | Action::Delete => engine.backspace(),
                Action::ClearAll => engine.clear_all(),
                Action::Parenthesis => engine.toggle_parenthesis(),
                Action::ToggleSign => engine.toggle_sign(),
                Action::Percent => engine.percent(),
                Action::SquareRoot => engine.square_root(),
                Action::Square => engine.square(),
                Action::Equals => engine.commit(),
            },
        }

        self.surface.render(self.engine.render());
    }

    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operator;
    use crate::ui::RecordingDisplay;

    fn press(buttons: &[&str]) -> Calculator<RecordingDisplay> {
        let mut calc = Calculator::new(ExpressionEngine::default(), RecordingDisplay::new());
        for button in buttons {
            calc.dispatch(Input::from_button(button).unwrap());
        }
        calc
    }

    #[test]
    fn test_initial_render() {
        let calc = press(&[]);
        assert_eq!(calc.surface().frames(), ["0"]);
    }

    #[test]
    fn test_renders_after_every_input() {
        let calc = press(&["1", "+", "2", "*", "3", "equals"]);
        assert_eq!(
            calc.surface().frames(),
            ["0", "1", "1+", "1+2", "1+2*", "1+2*3", "7"]
        );
    }

    #[test]
    fn test_leading_dot() {
        let calc = press(&[".", "5"]);
        assert_eq!(calc.surface().current(), Some("0.5"));
    }

    #[test]
    fn test_square_root_buttons() {
        let calc = press(&["9", "sqrt"]);
        assert_eq!(calc.surface().current(), Some("3"));

        let calc = press(&["-", "9", "square-root"]);
        assert_eq!(calc.surface().current(), Some("Error"));
        assert_eq!(calc.engine().expression(), "");
    }

    #[test]
    fn test_parenthesis_button() {
        let calc = press(&["parenthesis", "2", "+", "3", "parenthesis", "*", "4", "="]);
        assert_eq!(calc.surface().current(), Some("20"));
    }

    #[test]
    fn test_clear_entry_and_delete_match() {
        let a = press(&["1", "2", "ce"]);
        let b = press(&["1", "2", "del"]);
        assert_eq!(a.engine().expression(), "1");
        assert_eq!(b.engine().expression(), "1");
    }

    #[test]
    fn test_clear_all() {
        let calc = press(&["1", "+", "c"]);
        assert_eq!(calc.surface().current(), Some("0"));
    }

    #[test]
    fn test_key_path_raw_parens() {
        let mut calc = Calculator::new(ExpressionEngine::default(), RecordingDisplay::new());
        for input in [
            Input::OpenParen,
            Input::Digit('2'),
            Input::Operator(Operator::Add),
            Input::Digit('2'),
            Input::CloseParen,
            Input::Operator(Operator::Multiply),
            Input::Digit('3'),
            Input::Action(Action::Equals),
        ] {
            calc.dispatch(input);
        }
        assert_eq!(calc.surface().current(), Some("12"));
    }

    #[test]
    fn test_noop_still_renders_current_readout() {
        let calc = press(&["*"]);
        assert_eq!(calc.surface().frames(), ["0", "0"]);
    }
}
