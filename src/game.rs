//! Round controller.
//!
//! A [`Table`] owns the players, their agents, the deck and the pot. One call
//! to [`Table::play_round`] posts blinds, deals, runs the four betting
//! streets, settles the pot, removes busted players and moves the button.
//! [`Table::play`] repeats rounds until one player holds every chip.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::action::Action;
use crate::agents::{DecisionError, DecisionView, PlayerAgent};
use crate::betting::{ActionError, BettingRound, StreetState};
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate, EvalError, Evaluation};
use crate::hand::Board;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub const BETTING: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Pre-flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
        }
    }

    /// Community cards dealt when this street opens.
    pub fn board_cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
    Win,
    Split,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Raise => "Raise",
            HandHistoryVerb::AllIn => "All-in",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
        }
    }
}

impl From<Action> for HandHistoryVerb {
    fn from(action: Action) -> Self {
        match action {
            Action::Fold => HandHistoryVerb::Fold,
            Action::Check => HandHistoryVerb::Check,
            Action::Call => HandHistoryVerb::Call,
            Action::Raise(_) => HandHistoryVerb::Raise,
            Action::AllIn => HandHistoryVerb::AllIn,
        }
    }
}

/// One line of hand history. `amount` is the chips moved by the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub seat: usize,
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
    pub street: Street,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ShowdownHand {
    pub seat: usize,
    pub name: String,
    pub hole_cards: Vec<Card>,
    pub evaluation: Evaluation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Payout {
    pub seat: usize,
    pub name: String,
    pub amount: u64,
}

/// Result of one round. Seat indices refer to the table as it was during the
/// round, before busted players were removed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundOutcome {
    pub round: u32,
    pub board: Vec<Card>,
    pub decided_by_fold: bool,
    pub winners: Vec<usize>,
    pub payouts: Vec<Payout>,
    /// Every contesting hand, strongest first; empty when decided by fold.
    pub showdown: Vec<ShowdownHand>,
    pub eliminated: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct PlayOutcome {
    pub rounds: u32,
    pub winner: Option<String>,
    /// Remaining players by stack, largest first.
    pub standings: Vec<(String, u64)>,
}

/// Broadcast to every agent as the round unfolds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableEvent {
    RoundStarted { round: u32, dealer: String, stacks: Vec<(String, u64)> },
    /// Sent only to the seat receiving the cards.
    Dealt { cards: Vec<Card> },
    StreetStarted { street: Street, board: Vec<Card>, pot: u64 },
    Acted { name: String, entry: HandHistoryEntry },
    Showdown { hands: Vec<ShowdownHand> },
    RoundEnded { round: u32, payouts: Vec<Payout> },
    Eliminated { name: String },
    GameOver { winner: Option<String>, rounds: u32 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("need at least 2 players with chips, got {0}")]
    NotEnoughPlayers(usize),
    #[error("table is full: at most {max} seats")]
    TableFull { max: usize },
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("betting engine refused a fallback action: {0}")]
    Action(#[from] ActionError),
}

/// Seats one deck can serve: two hole cards each plus a full board.
pub const MAX_SEATS: usize = (52 - Board::MAX_CARDS) / 2;

pub struct Table {
    pub(crate) small_blind: u64,
    pub(crate) big_blind: u64,
    pub(crate) max_retries: u32,

    pub(crate) players: Vec<Player>,
    agents: Vec<Box<dyn PlayerAgent>>,
    pub(crate) dealer: usize,
    pub(crate) deck: Deck,
    pub(crate) board: Board,
    pub(crate) pot: u64,
    pub(crate) street: Street,
    rng: ChaCha8Rng,
    round: u32,
    hand_history: Vec<HandHistoryEntry>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("blinds", &(self.small_blind, self.big_blind))
            .field("players", &self.players)
            .field("dealer", &self.dealer)
            .field("board", &self.board)
            .field("pot", &self.pot)
            .field("street", &self.street)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

impl Table {
    pub fn new(small_blind: u64, big_blind: u64) -> Self {
        Self {
            small_blind,
            big_blind,
            max_retries: 5,
            players: Vec::new(),
            agents: Vec::new(),
            dealer: 0,
            deck: Deck::standard(),
            board: Board::new(),
            pot: 0,
            street: Street::Preflop,
            rng: ChaCha8Rng::seed_from_u64(rand::rng().random()),
            round: 0,
            hand_history: Vec::new(),
        }
    }

    /// Blinds, retry budget and seed from a validated config. Seats are added
    /// separately with [`Table::seat`].
    pub fn from_config(config: &TableConfig) -> Self {
        let table =
            Self::new(config.small_blind, config.big_blind).with_max_retries(config.max_retries);
        match config.seed {
            Some(seed) => table.with_seed(seed),
            None => table,
        }
    }

    /// Seed the shuffle RNG so every deal is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Add a player to the next seat clockwise.
    pub fn seat(
        &mut self,
        player: Player,
        agent: Box<dyn PlayerAgent>,
    ) -> Result<(), RoundError> {
        if self.players.len() >= MAX_SEATS {
            return Err(RoundError::TableFull { max: MAX_SEATS });
        }
        self.players.push(player);
        self.agents.push(agent);
        Ok(())
    }

    pub fn small_blind(&self) -> u64 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u64 {
        self.big_blind
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn street(&self) -> Street {
        self.street
    }

    /// Rounds started so far.
    pub fn rounds_played(&self) -> u32 {
        self.round
    }

    /// Pot plus every stack; constant for the life of the table.
    pub fn total_chips(&self) -> u64 {
        self.pot + self.players.iter().map(|p| p.stack()).sum::<u64>()
    }

    /// History of the current (or last) round.
    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.hand_history
    }

    fn funded(&self) -> usize {
        self.players.iter().filter(|p| p.stack() > 0).count()
    }

    /// Play rounds until at most one player has chips or `max_rounds` have
    /// been played.
    pub fn play(&mut self, max_rounds: Option<u32>) -> Result<PlayOutcome, RoundError> {
        let mut rounds = 0;
        while self.funded() > 1 && max_rounds.map_or(true, |m| rounds < m) {
            self.play_round()?;
            rounds += 1;
        }
        let winner = match self.players.as_slice() {
            [p] => Some(p.name().to_string()),
            _ => None,
        };
        let mut standings: Vec<(String, u64)> =
            self.players.iter().map(|p| (p.name().to_string(), p.stack())).collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1));
        log::info!("game over after {rounds} rounds, winner {winner:?}");
        self.emit(TableEvent::GameOver { winner: winner.clone(), rounds });
        Ok(PlayOutcome { rounds, winner, standings })
    }

    /// Play one complete round. If the round cannot finish, every chip put in
    /// during it goes back to its owner before the error is returned.
    pub fn play_round(&mut self) -> Result<RoundOutcome, RoundError> {
        let funded = self.funded();
        if funded < 2 {
            return Err(RoundError::NotEnoughPlayers(funded));
        }
        self.start_round();
        let result = self.run_round();
        if let Err(e) = &result {
            log::warn!("round {} aborted: {e}", self.round);
            self.abort_round();
        }
        result
    }

    fn run_round(&mut self) -> Result<RoundOutcome, RoundError> {
        let (sb, bb) = self.blind_seats();
        self.post_blind(sb, self.small_blind, HandHistoryVerb::SmallBlind);
        self.post_blind(bb, self.big_blind, HandHistoryVerb::BigBlind);
        self.deal_hole_cards()?;

        let mut decided_by = None;
        for street in Street::BETTING {
            let (first, current_bet) = if street == Street::Preflop {
                let posted = self.players.iter().map(|p| p.street_contribution()).max();
                (self.next_seat(bb), posted.unwrap_or(0))
            } else {
                self.open_street(street)?;
                (self.next_seat(self.dealer), 0)
            };
            log::info!("round {}: {street}, pot {}", self.round, self.pot);
            self.emit(TableEvent::StreetStarted {
                street,
                board: self.board.as_slice().to_vec(),
                pot: self.pot,
            });
            if let StreetState::DecidedByFold(seat) = self.run_street(first, current_bet)? {
                decided_by = Some(seat);
                break;
            }
        }

        let (winners, showdown) = match decided_by {
            Some(seat) => (vec![seat], Vec::new()),
            None => self.showdown()?,
        };
        let payouts = self.settle(&winners);
        for p in &mut self.players {
            p.muck();
        }
        log::info!("round {} settled: {payouts:?}", self.round);
        self.emit(TableEvent::RoundEnded { round: self.round, payouts: payouts.clone() });
        let outcome = RoundOutcome {
            round: self.round,
            board: self.board.as_slice().to_vec(),
            decided_by_fold: decided_by.is_some(),
            winners,
            payouts,
            showdown,
            eliminated: Vec::new(),
        };
        let eliminated = self.eliminate_and_rotate();
        Ok(RoundOutcome { eliminated, ..outcome })
    }

    fn start_round(&mut self) {
        self.round += 1;
        self.deck = Deck::standard();
        self.deck.shuffle_with(&mut self.rng);
        self.board.clear();
        self.pot = 0;
        self.street = Street::Preflop;
        self.hand_history.clear();
        for p in &mut self.players {
            p.reset_for_round();
            if p.stack() == 0 {
                p.fold();
            }
        }
        if !self.players.is_empty() {
            self.dealer %= self.players.len();
            if !self.players[self.dealer].is_contesting() {
                self.dealer = self.next_seat(self.dealer);
            }
        }
        log::info!("round {} starts, dealer seat {}", self.round, self.dealer);
        let stacks = self.players.iter().map(|p| (p.name().to_string(), p.stack())).collect();
        self.emit(TableEvent::RoundStarted {
            round: self.round,
            dealer: self.players[self.dealer].name().to_string(),
            stacks,
        });
    }

    /// Heads-up the dealer posts the small blind; otherwise the two seats
    /// after the dealer post.
    fn blind_seats(&self) -> (usize, usize) {
        let active = self.players.iter().filter(|p| p.is_contesting()).count();
        let sb = if active == 2 { self.dealer } else { self.next_seat(self.dealer) };
        (sb, self.next_seat(sb))
    }

    /// Next seat clockwise from `from` that is still in the round.
    fn next_seat(&self, from: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&seat| self.players[seat].is_contesting())
            .unwrap_or(from)
    }

    fn post_blind(&mut self, seat: usize, amount: u64, verb: HandHistoryVerb) {
        let paid = self.players[seat].commit(amount);
        self.pot += paid;
        self.record(seat, verb, Some(paid));
    }

    fn deal_hole_cards(&mut self) -> Result<(), RoundError> {
        let n = self.players.len();
        for offset in 1..=n {
            let seat = (self.dealer + offset) % n;
            if !self.players[seat].is_contesting() {
                continue;
            }
            let cards = self.deck.deal(2)?;
            self.players[seat].hole_cards = cards.clone();
            self.agents[seat].observe(&TableEvent::Dealt { cards });
        }
        Ok(())
    }

    fn open_street(&mut self, street: Street) -> Result<(), RoundError> {
        for p in &mut self.players {
            p.reset_for_street();
        }
        let cards = self.deck.deal(street.board_cards())?;
        self.board.extend(cards).map_err(EvalError::from)?;
        self.street = street;
        Ok(())
    }

    fn run_street(&mut self, first: usize, current_bet: u64) -> Result<StreetState, RoundError> {
        let mut round = BettingRound::open(&self.players, first, current_bet);
        loop {
            let seat = match round.state(&self.players) {
                StreetState::AwaitingAction(seat) => seat,
                other => return Ok(other),
            };
            let before = self.players[seat].round_contribution();
            let action = self.take_action(&mut round, seat)?;
            let paid = self.players[seat].round_contribution() - before;
            let amount = match action {
                Action::Fold | Action::Check => None,
                _ => Some(paid),
            };
            self.record(seat, action.into(), amount);
        }
    }

    /// Ask the seat's agent until it produces a legal action, at most
    /// `max_retries` times. After that the seat checks if it can, else folds.
    fn take_action(&mut self, round: &mut BettingRound, seat: usize) -> Result<Action, RoundError> {
        for attempt in 1..=self.max_retries {
            let decision = {
                let player = &self.players[seat];
                let view = DecisionView {
                    seat,
                    name: player.name(),
                    street: self.street,
                    hole_cards: player.hole_cards(),
                    board: self.board.as_slice(),
                    pot: self.pot,
                    current_bet: round.current_bet(),
                    contribution: player.street_contribution(),
                    stack: player.stack(),
                };
                self.agents[seat].decide(&view)
            };
            let err = match decision {
                Ok(action) => match round.apply(&mut self.players, &mut self.pot, action) {
                    Ok(_) => return Ok(action),
                    Err(e) => DecisionError::from(e),
                },
                Err(e) => e,
            };
            log::warn!("seat {seat} decision rejected ({attempt}/{}): {err}", self.max_retries);
            if err.is_terminal() {
                break;
            }
            self.agents[seat].rejected(&err);
        }
        let fallback =
            if round.to_call(&self.players[seat]) == 0 { Action::Check } else { Action::Fold };
        log::warn!("seat {seat} gets a default {fallback}");
        round.apply(&mut self.players, &mut self.pot, fallback)?;
        Ok(fallback)
    }

    /// Evaluate every contesting hand; the best ones win.
    pub(crate) fn showdown(&mut self) -> Result<(Vec<usize>, Vec<ShowdownHand>), RoundError> {
        self.street = Street::Showdown;
        let mut hands = Vec::new();
        for (seat, p) in self.players.iter().enumerate().filter(|(_, p)| p.is_contesting()) {
            let evaluation = evaluate(&self.board.with_hole(p.hole_cards()))?;
            log::debug!("seat {seat} shows {}", evaluation.category());
            hands.push(ShowdownHand {
                seat,
                name: p.name().to_string(),
                hole_cards: p.hole_cards().to_vec(),
                evaluation,
            });
        }
        hands.sort_by(|a, b| b.evaluation.cmp(&a.evaluation).then(a.seat.cmp(&b.seat)));
        let best = hands.first().ok_or(RoundError::NotEnoughPlayers(0))?.evaluation.clone();
        let winners = hands.iter().filter(|h| h.evaluation == best).map(|h| h.seat).collect();
        self.emit(TableEvent::Showdown { hands: hands.clone() });
        Ok((winners, hands))
    }

    /// Split the pot evenly among `winners`. Odd chips go one at a time in
    /// seat order starting left of the dealer.
    pub(crate) fn settle(&mut self, winners: &[usize]) -> Vec<Payout> {
        let n = self.players.len();
        if winners.is_empty() || n == 0 {
            return Vec::new();
        }
        let start = (self.dealer + 1) % n;
        let mut ordered = winners.to_vec();
        ordered.sort_by_key(|&seat| (seat + n - start) % n);

        let k = ordered.len() as u64;
        let share = self.pot / k;
        let odd = self.pot % k;
        let verb = if k > 1 { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
        let mut payouts = Vec::with_capacity(ordered.len());
        for (i, &seat) in ordered.iter().enumerate() {
            let amount = share + u64::from((i as u64) < odd);
            self.players[seat].award(amount);
            self.record(seat, verb, Some(amount));
            payouts.push(Payout { seat, name: self.players[seat].name().to_string(), amount });
        }
        self.pot = 0;
        payouts
    }

    fn abort_round(&mut self) {
        for p in &mut self.players {
            p.refund();
        }
        self.pot = 0;
        self.board.clear();
        self.hand_history.clear();
    }

    /// Drop players with no chips and pass the button to the next survivor.
    fn eliminate_and_rotate(&mut self) -> Vec<String> {
        let n = self.players.len();
        let next_dealer = (1..=n)
            .map(|offset| (self.dealer + offset) % n)
            .find(|&seat| self.players[seat].stack() > 0);

        let busted: Vec<String> = self
            .players
            .iter()
            .filter(|p| p.stack() == 0)
            .map(|p| p.name().to_string())
            .collect();
        for name in &busted {
            log::info!("{name} is eliminated");
            self.emit(TableEvent::Eliminated { name: name.clone() });
        }

        let players = std::mem::take(&mut self.players);
        let agents = std::mem::take(&mut self.agents);
        self.dealer = 0;
        for (seat, (player, agent)) in players.into_iter().zip(agents).enumerate() {
            if player.stack() == 0 {
                continue;
            }
            if Some(seat) == next_dealer {
                self.dealer = self.players.len();
            }
            self.players.push(player);
            self.agents.push(agent);
        }
        busted
    }

    fn record(&mut self, seat: usize, verb: HandHistoryVerb, amount: Option<u64>) {
        let entry = HandHistoryEntry { seat, verb, amount, street: self.street };
        log::debug!("{} {} {:?}", self.players[seat].name(), verb.label(), amount);
        self.hand_history.push(entry.clone());
        self.emit(TableEvent::Acted { name: self.players[seat].name().to_string(), entry });
    }

    fn emit(&mut self, event: TableEvent) {
        for agent in &mut self.agents {
            agent.observe(&event);
        }
    }
}
