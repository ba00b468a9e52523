//! Player actions and their textual form.
//!
//! Text from a prompt is parsed into [`Action`] at the boundary; anything that
//! is not one of the five actions becomes an [`ActionParseError`] and never
//! reaches the betting engine.

use std::fmt;
use std::str::FromStr;

/// The five betting decisions. `Raise(n)` raises *by* `n` over the current bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(u64),
    AllIn,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Raise(_) => "raise",
            Action::AllIn => "all-in",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Raise(n) => write!(f, "raise {n}"),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("unknown action '{0}' (expected fold, check, call, raise <amount>, all-in)")]
    InvalidAction(String),
    #[error("invalid raise amount '{0}': enter a positive whole number")]
    InvalidAmount(String),
}

/// Parse a raise amount: a positive integer.
pub fn parse_amount(s: &str) -> Result<u64, ActionParseError> {
    let t = s.trim();
    match t.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ActionParseError::InvalidAmount(t.to_string())),
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// ```
    /// use poker_table::action::{Action, ActionParseError};
    ///
    /// assert_eq!("Raise 40".parse::<Action>(), Ok(Action::Raise(40)));
    /// assert_eq!("all-in".parse::<Action>(), Ok(Action::AllIn));
    /// assert!(matches!("bet".parse::<Action>(), Err(ActionParseError::InvalidAction(_))));
    /// assert!(matches!("raise x".parse::<Action>(), Err(ActionParseError::InvalidAmount(_))));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let mut parts = lower.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();
        let action = match (verb, rest.as_slice()) {
            ("fold" | "f", []) => Action::Fold,
            ("check" | "k", []) => Action::Check,
            ("call" | "c", []) => Action::Call,
            ("all-in" | "allin" | "shove" | "a", []) => Action::AllIn,
            ("all", ["in"]) => Action::AllIn,
            ("raise" | "r", [amount]) => Action::Raise(parse_amount(amount)?),
            ("raise" | "r", []) => return Err(ActionParseError::InvalidAmount(String::new())),
            _ => return Err(ActionParseError::InvalidAction(s.trim().to_string())),
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_action() {
        assert_eq!("fold".parse::<Action>(), Ok(Action::Fold));
        assert_eq!(" CHECK ".parse::<Action>(), Ok(Action::Check));
        assert_eq!("call".parse::<Action>(), Ok(Action::Call));
        assert_eq!("raise 25".parse::<Action>(), Ok(Action::Raise(25)));
        assert_eq!("r 5".parse::<Action>(), Ok(Action::Raise(5)));
        assert_eq!("all in".parse::<Action>(), Ok(Action::AllIn));
        assert_eq!("allin".parse::<Action>(), Ok(Action::AllIn));
    }

    #[test]
    fn rejects_unknown_tokens() {
        for bad in ["", "bet", "fold now", "calls", "raise 10 20"] {
            assert!(
                matches!(bad.parse::<Action>(), Err(ActionParseError::InvalidAction(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_amounts() {
        for bad in ["raise", "raise ten", "raise 0", "raise -5", "raise 1.5"] {
            assert!(
                matches!(bad.parse::<Action>(), Err(ActionParseError::InvalidAmount(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for a in [Action::Fold, Action::Check, Action::Call, Action::Raise(30), Action::AllIn] {
            assert_eq!(a.to_string().parse::<Action>(), Ok(a));
        }
    }
}
