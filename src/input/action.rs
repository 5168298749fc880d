//! Named calculator actions (the non-digit, non-operator buttons).

use super::InputError;
use std::fmt;
use std::str::FromStr;

/// A named action button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    ClearEntry,
    ClearAll,
    Delete,
    Parenthesis,
    ToggleSign,
    Percent,
    SquareRoot,
    Square,
    Equals,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Self::ClearEntry,
        Self::ClearAll,
        Self::Delete,
        Self::Parenthesis,
        Self::ToggleSign,
        Self::Percent,
        Self::SquareRoot,
        Self::Square,
        Self::Equals,
    ];

    /// Canonical button name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ClearEntry => "clear-entry",
            Self::ClearAll => "clear-all",
            Self::Delete => "delete",
            Self::Parenthesis => "parenthesis",
            Self::ToggleSign => "toggle-sign",
            Self::Percent => "percent",
            Self::SquareRoot => "square-root",
            Self::Square => "square",
            Self::Equals => "equals",
        }
    }

    /// Short names printed on the keypad.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::ClearEntry => &["ce"],
            Self::ClearAll => &["c"],
            Self::Delete => &["del"],
            Self::Parenthesis => &["()"],
            Self::ToggleSign => &["+/-"],
            Self::Percent => &["%"],
            Self::SquareRoot => &["sqrt"],
            Self::Square => &["sqr"],
            Self::Equals => &["=", "equal"],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.name() == lower || action.aliases().contains(&lower.as_str()))
            .ok_or_else(|| InputError::UnknownButton(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("ce".parse::<Action>().unwrap(), Action::ClearEntry);
        assert_eq!("C".parse::<Action>().unwrap(), Action::ClearAll);
        assert_eq!("sqrt".parse::<Action>().unwrap(), Action::SquareRoot);
        assert_eq!("sqr".parse::<Action>().unwrap(), Action::Square);
        assert_eq!("=".parse::<Action>().unwrap(), Action::Equals);
        assert_eq!("equal".parse::<Action>().unwrap(), Action::Equals);
    }

    #[test]
    fn test_unknown_action() {
        assert!(matches!(
            "cube".parse::<Action>(),
            Err(InputError::UnknownButton(name)) if name == "cube"
        ));
    }
}
