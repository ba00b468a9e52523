//! Agents: the decision collaborators that sit in each seat.
//!
//! The round controller never reads input itself. When a seat owes a
//! decision it builds a [`DecisionView`] and asks the seat's [`PlayerAgent`];
//! rejected decisions are handed back through [`PlayerAgent::rejected`] and
//! the same decision point is asked again.

use std::collections::VecDeque;

use crate::action::{Action, ActionParseError};
use crate::betting::ActionError;
use crate::cards::Card;
use crate::game::{Street, TableEvent};
use crate::variants::draw::{self, DiscardError};

mod bots;
mod human;

pub use bots::{BotAgent, BotProfile};
pub use human::{HumanAgent, LineSource, SharedInput};

/// Why a decision could not be used.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecisionError {
    #[error(transparent)]
    Parse(#[from] ActionParseError),
    #[error(transparent)]
    Illegal(#[from] ActionError),
    #[error(transparent)]
    Discard(#[from] DiscardError),
    #[error("input closed")]
    InputClosed,
    #[error("i/o error: {0}")]
    Io(String),
}

impl DecisionError {
    /// The agent can no longer answer; asking again is pointless.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DecisionError::InputClosed | DecisionError::Io(_))
    }
}

/// What a seat can see when it is asked to act.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct DecisionView<'a> {
    pub seat: usize,
    pub name: &'a str,
    pub street: Street,
    pub hole_cards: &'a [Card],
    pub board: &'a [Card],
    pub pot: u64,
    pub current_bet: u64,
    pub contribution: u64,
    pub stack: u64,
}

impl DecisionView<'_> {
    pub fn to_call(&self) -> u64 {
        self.current_bet.saturating_sub(self.contribution)
    }

    pub fn can_check(&self) -> bool {
        self.to_call() == 0
    }

    /// Largest `Raise(n)` the seat may make; zero when it cannot raise.
    pub fn max_raise(&self) -> u64 {
        self.stack.saturating_sub(self.to_call())
    }
}

/// A seat controller.
pub trait PlayerAgent {
    /// Choose an action for the seat described by `view`.
    fn decide(&mut self, view: &DecisionView<'_>) -> Result<Action, DecisionError>;

    /// Choose which cards (by index) to replace in five-card draw.
    fn discard(&mut self, hand: &[Card]) -> Result<Vec<usize>, DecisionError> {
        Ok(draw::suggest_discards(hand))
    }

    /// The last decision was refused and will be asked for again.
    fn rejected(&mut self, _error: &DecisionError) {}

    /// Table news: actions, streets, showdowns.
    fn observe(&mut self, _event: &TableEvent) {}
}

/// Replays queued input lines, parsing them like a human prompt would.
///
/// Once the queue runs dry it checks when allowed and folds otherwise.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    lines: VecDeque<String>,
    discards: VecDeque<Vec<usize>>,
}

impl ScriptedAgent {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self::from_lines(actions.into_iter().map(|a| a.to_string()))
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { lines: lines.into_iter().map(Into::into).collect(), discards: VecDeque::new() }
    }

    pub fn with_discards(mut self, discards: impl IntoIterator<Item = Vec<usize>>) -> Self {
        self.discards = discards.into_iter().collect();
        self
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl PlayerAgent for ScriptedAgent {
    fn decide(&mut self, view: &DecisionView<'_>) -> Result<Action, DecisionError> {
        match self.lines.pop_front() {
            Some(line) => Ok(line.parse::<Action>()?),
            None if view.can_check() => Ok(Action::Check),
            None => Ok(Action::Fold),
        }
    }

    fn discard(&mut self, hand: &[Card]) -> Result<Vec<usize>, DecisionError> {
        match self.discards.pop_front() {
            Some(indices) => {
                draw::validate_discards(&indices, hand.len())?;
                Ok(indices)
            }
            None => Ok(Vec::new()),
        }
    }
}
