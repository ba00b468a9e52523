//! Single-street betting engine.
//!
//! A [`BettingRound`] owns the street's `current_bet` and the ordered set of
//! seats that still owe a decision. Every action is validated against the
//! acting player before any chips move; on success the obligation set is
//! updated and the resulting [`StreetState`] is returned.

use std::collections::VecDeque;

use crate::action::Action;
use crate::player::Player;

/// Where a street stands after the last applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StreetState {
    /// The seat at the head of the obligation set must act next.
    AwaitingAction(usize),
    /// Nobody owes a decision; the street is over.
    StreetClosed,
    /// Everyone else folded; the seat takes the pot with no further streets.
    DecidedByFold(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no player is waiting to act on this street")]
    NotAwaitingAction,
    #[error("cannot check while facing a bet of {to_call}")]
    CheckNotAllowed { to_call: u64 },
    #[error("raise amount out of range: max {max}, got {got}")]
    InvalidAmount { max: u64, got: u64 },
    #[error("cannot raise: {to_call} to call with only {stack} behind")]
    RaiseNotPossible { to_call: u64, stack: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRound {
    current_bet: u64,
    to_act: VecDeque<usize>,
}

impl BettingRound {
    /// Open a street. `first_actor` is the first seat asked to act;
    /// every seat that can still act joins the obligation set in table order
    /// from there. `current_bet` is the amount already posted (the big blind
    /// pre-flop, zero afterwards).
    ///
    /// When at most one seat can act and it owes nothing, the street opens
    /// already closed.
    pub fn open(players: &[Player], first_actor: usize, current_bet: u64) -> Self {
        let n = players.len();
        let mut to_act: VecDeque<usize> = (0..n)
            .map(|offset| (first_actor + offset) % n.max(1))
            .filter(|&seat| players[seat].can_act())
            .collect();
        if to_act.len() == 1 {
            let lone = to_act[0];
            if players[lone].owes(current_bet) == 0 {
                to_act.clear();
            }
        }
        log::debug!("street opened: current_bet={current_bet} to_act={to_act:?}");
        Self { current_bet, to_act }
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Seats that still owe a decision, next actor first.
    pub fn to_act(&self) -> impl Iterator<Item = usize> + '_ {
        self.to_act.iter().copied()
    }

    /// Next seat to act, if any.
    pub fn actor(&self) -> Option<usize> {
        self.to_act.front().copied()
    }

    pub fn to_call(&self, player: &Player) -> u64 {
        player.owes(self.current_bet)
    }

    /// Largest legal `Raise(n)` for `player`; zero when raising is impossible.
    pub fn max_raise(&self, player: &Player) -> u64 {
        player.stack().saturating_sub(self.to_call(player))
    }

    pub fn state(&self, players: &[Player]) -> StreetState {
        let mut contesting = players.iter().enumerate().filter(|(_, p)| p.is_contesting());
        if let (Some((seat, _)), None) = (contesting.next(), contesting.next()) {
            return StreetState::DecidedByFold(seat);
        }
        match self.actor() {
            Some(seat) => StreetState::AwaitingAction(seat),
            None => StreetState::StreetClosed,
        }
    }

    /// Check `action` for the current actor without touching any state.
    pub fn validate(&self, players: &[Player], action: Action) -> Result<usize, ActionError> {
        let seat = self.actor().ok_or(ActionError::NotAwaitingAction)?;
        let player = &players[seat];
        let to_call = self.to_call(player);
        match action {
            Action::Check if to_call > 0 => Err(ActionError::CheckNotAllowed { to_call }),
            Action::Raise(_) if player.stack() <= to_call => {
                Err(ActionError::RaiseNotPossible { to_call, stack: player.stack() })
            }
            Action::Raise(amount) => {
                let max = self.max_raise(player);
                if amount == 0 || amount > max {
                    Err(ActionError::InvalidAmount { max, got: amount })
                } else {
                    Ok(seat)
                }
            }
            _ => Ok(seat),
        }
    }

    /// Apply `action` for the current actor, moving chips into `pot`.
    ///
    /// Errors leave `players`, `pot` and the obligation set untouched.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        pot: &mut u64,
        action: Action,
    ) -> Result<StreetState, ActionError> {
        let seat = self.validate(players, action)?;
        self.to_act.pop_front();

        let to_call = self.to_call(&players[seat]);
        match action {
            Action::Fold => players[seat].fold(),
            Action::Check => {}
            Action::Call => {
                *pot += players[seat].commit(to_call);
            }
            Action::Raise(amount) => {
                *pot += players[seat].commit(to_call + amount);
                self.current_bet = players[seat].street_contribution();
                self.reopen(players, seat);
            }
            Action::AllIn => {
                let stack = players[seat].stack();
                *pot += players[seat].commit(stack);
                let total = players[seat].street_contribution();
                if total > self.current_bet {
                    self.current_bet = total;
                    self.reopen(players, seat);
                }
            }
        }
        log::debug!(
            "seat {seat} {action}: current_bet={} pot={} to_act={:?}",
            self.current_bet,
            pot,
            self.to_act
        );
        Ok(self.state(players))
    }

    /// Everyone else who can still act owes a new decision, in table order
    /// after the raiser.
    fn reopen(&mut self, players: &[Player], raiser: usize) {
        let n = players.len();
        self.to_act = (1..n)
            .map(|offset| (raiser + offset) % n)
            .filter(|&seat| players[seat].can_act())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(stacks: &[u64]) -> Vec<Player> {
        stacks.iter().enumerate().map(|(i, &s)| Player::new(format!("P{}", i + 1), s)).collect()
    }

    #[test]
    fn everyone_checks_closes_street() {
        let mut players = table(&[100, 100, 100]);
        let mut pot = 0;
        let mut round = BettingRound::open(&players, 1, 0);
        assert_eq!(round.state(&players), StreetState::AwaitingAction(1));
        let mut check = |players: &mut Vec<Player>| round.apply(players, &mut pot, Action::Check);
        assert_eq!(check(&mut players), Ok(StreetState::AwaitingAction(2)));
        assert_eq!(check(&mut players), Ok(StreetState::AwaitingAction(0)));
        assert_eq!(check(&mut players), Ok(StreetState::StreetClosed));
        assert_eq!(pot, 0);
    }

    #[test]
    fn raise_reopens_for_players_who_already_acted() {
        let mut players = table(&[100, 100, 100]);
        let mut pot = 0;
        let mut round = BettingRound::open(&players, 0, 0);
        round.apply(&mut players, &mut pot, Action::Check).unwrap();
        let state = round.apply(&mut players, &mut pot, Action::Raise(10)).unwrap();
        assert_eq!(state, StreetState::AwaitingAction(2));
        assert_eq!(round.to_act().collect::<Vec<_>>(), vec![2, 0]);
        assert_eq!(round.current_bet(), 10);
        round.apply(&mut players, &mut pot, Action::Call).unwrap();
        let state = round.apply(&mut players, &mut pot, Action::Call).unwrap();
        assert_eq!(state, StreetState::StreetClosed);
        assert_eq!(pot, 30);
    }

    #[test]
    fn check_facing_bet_is_rejected_without_mutation() {
        let mut players = table(&[100, 100]);
        players[0].commit(20);
        let mut pot = 20;
        let mut round = BettingRound::open(&players, 1, 20);
        let before = (players.clone(), round.clone());
        assert_eq!(
            round.apply(&mut players, &mut pot, Action::Check),
            Err(ActionError::CheckNotAllowed { to_call: 20 })
        );
        assert_eq!((players, round), before);
        assert_eq!(pot, 20);
    }

    #[test]
    fn raise_bounds_are_enforced() {
        let mut players = table(&[100, 50]);
        players[0].commit(20);
        let mut pot = 20;
        let mut round = BettingRound::open(&players, 1, 20);
        assert_eq!(
            round.apply(&mut players, &mut pot, Action::Raise(31)),
            Err(ActionError::InvalidAmount { max: 30, got: 31 })
        );
        assert_eq!(
            round.apply(&mut players, &mut pot, Action::Raise(0)),
            Err(ActionError::InvalidAmount { max: 30, got: 0 })
        );
        assert_eq!(players[1].stack(), 50);

        let mut short = table(&[100, 20]);
        short[0].commit(20);
        let mut round = BettingRound::open(&short, 1, 20);
        assert_eq!(
            round.apply(&mut short, &mut pot, Action::Raise(5)),
            Err(ActionError::RaiseNotPossible { to_call: 20, stack: 20 })
        );
    }

    #[test]
    fn call_short_of_bet_is_implicit_all_in() {
        let mut players = table(&[100, 15]);
        players[0].commit(40);
        let mut pot = 40;
        let mut round = BettingRound::open(&players, 1, 40);
        let state = round.apply(&mut players, &mut pot, Action::Call).unwrap();
        assert!(players[1].is_all_in());
        assert_eq!(players[1].street_contribution(), 15);
        assert_eq!(round.current_bet(), 40);
        assert_eq!(state, StreetState::StreetClosed);
        assert_eq!(pot, 55);
    }

    #[test]
    fn all_in_below_bet_does_not_reopen() {
        let mut players = table(&[100, 100, 10]);
        let mut pot = 0;
        let mut round = BettingRound::open(&players, 0, 0);
        round.apply(&mut players, &mut pot, Action::Raise(30)).unwrap();
        round.apply(&mut players, &mut pot, Action::Call).unwrap();
        let state = round.apply(&mut players, &mut pot, Action::AllIn).unwrap();
        assert_eq!(state, StreetState::StreetClosed);
        assert_eq!(round.current_bet(), 30);
    }

    #[test]
    fn all_in_above_bet_reopens() {
        let mut players = table(&[100, 100, 60]);
        let mut pot = 0;
        let mut round = BettingRound::open(&players, 0, 0);
        round.apply(&mut players, &mut pot, Action::Raise(30)).unwrap();
        round.apply(&mut players, &mut pot, Action::Call).unwrap();
        let state = round.apply(&mut players, &mut pot, Action::AllIn).unwrap();
        assert_eq!(round.current_bet(), 60);
        assert_eq!(state, StreetState::AwaitingAction(0));
        assert_eq!(round.to_act().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn lone_actor_owing_nothing_opens_closed() {
        let mut players = table(&[100, 0, 0]);
        players[1].is_all_in = true;
        players[2].is_all_in = true;
        let round = BettingRound::open(&players, 0, 0);
        assert_eq!(round.state(&players), StreetState::StreetClosed);
    }

    #[test]
    fn lone_actor_facing_bet_must_still_act() {
        let mut players = table(&[100, 30]);
        players[1].commit(30);
        let round = BettingRound::open(&players, 0, 30);
        assert_eq!(round.state(&players), StreetState::AwaitingAction(0));
    }

    #[test]
    fn fold_to_one_player_decides_hand() {
        let mut players = table(&[100, 100, 100]);
        let mut pot = 0;
        let mut round = BettingRound::open(&players, 0, 0);
        round.apply(&mut players, &mut pot, Action::Raise(10)).unwrap();
        round.apply(&mut players, &mut pot, Action::Fold).unwrap();
        let state = round.apply(&mut players, &mut pot, Action::Fold).unwrap();
        assert_eq!(state, StreetState::DecidedByFold(0));
    }

    #[test]
    fn closed_street_rejects_actions() {
        let mut players = table(&[100, 100]);
        let mut pot = 0;
        let mut round = BettingRound::open(&players, 0, 0);
        round.apply(&mut players, &mut pot, Action::Check).unwrap();
        round.apply(&mut players, &mut pot, Action::Check).unwrap();
        assert_eq!(
            round.apply(&mut players, &mut pot, Action::Fold),
            Err(ActionError::NotAwaitingAction)
        );
    }
}
