//! Five-card draw.
//!
//! Every seat is dealt five cards, may replace any of them once from the same
//! deck, and the final hands are ranked with [`evaluate_five`]. There is no
//! betting: the best hand wins and exact ties share the win.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::agents::{DecisionError, PlayerAgent};
use crate::cards::Card;
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate_five, Category, EvalError, Evaluation};

pub const HAND_SIZE: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiscardError {
    #[error("'{0}' is not a card position")]
    InvalidPosition(String),
    #[error("position {position} is outside 1..={len}")]
    OutOfRange { position: usize, len: usize },
    #[error("position {0} listed twice")]
    Duplicate(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DrawError {
    #[error("need at least 2 players, got {0}")]
    NotEnoughPlayers(usize),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Parse 1-based card positions ("1 3 5") into sorted 0-based indices.
/// Blank input keeps the whole hand.
///
/// ```
/// use poker_table::variants::draw::parse_discards;
///
/// assert_eq!(parse_discards("5 1", 5), Ok(vec![0, 4]));
/// assert_eq!(parse_discards("", 5), Ok(vec![]));
/// assert!(parse_discards("6", 5).is_err());
/// ```
pub fn parse_discards(input: &str, len: usize) -> Result<Vec<usize>, DiscardError> {
    let mut indices = Vec::new();
    for token in input.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty()) {
        let position: usize =
            token.parse().map_err(|_| DiscardError::InvalidPosition(token.to_string()))?;
        if position == 0 || position > len {
            return Err(DiscardError::OutOfRange { position, len });
        }
        indices.push(position - 1);
    }
    validate_discards(&indices, len)?;
    indices.sort_unstable();
    Ok(indices)
}

/// Every index must be in range and appear once.
pub fn validate_discards(indices: &[usize], len: usize) -> Result<(), DiscardError> {
    let mut seen = vec![false; len];
    for &i in indices {
        if i >= len {
            return Err(DiscardError::OutOfRange { position: i + 1, len });
        }
        if seen[i] {
            return Err(DiscardError::Duplicate(i + 1));
        }
        seen[i] = true;
    }
    Ok(())
}

/// Keep a pair or better untouched; otherwise throw away every card whose rank
/// appears only once.
pub fn suggest_discards(hand: &[Card]) -> Vec<usize> {
    if let Ok(five) = <[Card; HAND_SIZE]>::try_from(hand) {
        if evaluate_five(&five).category() >= Category::OnePair {
            return Vec::new();
        }
    }
    let mut counts = [0u8; 15];
    for c in hand {
        counts[c.rank().value() as usize] += 1;
    }
    hand.iter()
        .enumerate()
        .filter(|(_, c)| counts[c.rank().value() as usize] < 2)
        .map(|(i, _)| i)
        .collect()
}

/// One seat's final hand.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DrawResult {
    pub seat: usize,
    pub name: String,
    pub hand: Vec<Card>,
    pub replaced: usize,
    pub evaluation: Evaluation,
}

/// Results ranked best first, plus every seat sharing the top hand.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DrawOutcome {
    pub results: Vec<DrawResult>,
    pub winners: Vec<usize>,
}

impl DrawOutcome {
    pub fn is_split(&self) -> bool {
        self.winners.len() > 1
    }
}

pub struct DrawTable {
    seats: Vec<(String, Box<dyn PlayerAgent>)>,
    rng: ChaCha8Rng,
    max_retries: u32,
}

impl fmt::Debug for DrawTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.seats.iter().map(|(n, _)| n.as_str()).collect();
        write!(f, "DrawTable({})", names.join(", "))
    }
}

impl DrawTable {
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seats: Vec::new(), rng: ChaCha8Rng::seed_from_u64(seed), max_retries: 5 }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn seat(&mut self, name: impl Into<String>, agent: Box<dyn PlayerAgent>) {
        self.seats.push((name.into(), agent));
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Deal, let each seat draw once, and rank the final hands.
    pub fn play(&mut self) -> Result<DrawOutcome, DrawError> {
        let n = self.seats.len();
        if n < 2 {
            return Err(DrawError::NotEnoughPlayers(n));
        }
        let mut deck = Deck::standard();
        deck.shuffle_with(&mut self.rng);

        let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(HAND_SIZE); n];
        for _ in 0..HAND_SIZE {
            for hand in &mut hands {
                hand.extend(deck.deal(1)?);
            }
        }
        log::info!("draw: dealt {n} hands, {} cards left", deck.remaining());

        let mut replaced = vec![0usize; n];
        for (seat, hand) in hands.iter_mut().enumerate() {
            let discards = self.ask_discards(seat, hand);
            let fresh = deck.deal(discards.len())?;
            for &i in discards.iter().rev() {
                hand.remove(i);
            }
            hand.extend(fresh);
            replaced[seat] = discards.len();
            log::debug!("draw: seat {seat} replaced {} cards", discards.len());
        }

        let mut results = Vec::with_capacity(n);
        for (seat, hand) in hands.into_iter().enumerate() {
            let five = <[Card; HAND_SIZE]>::try_from(hand.as_slice())
                .map_err(|_| EvalError::DegenerateHand(hand.len()))?;
            results.push(DrawResult {
                seat,
                name: self.seats[seat].0.clone(),
                evaluation: evaluate_five(&five),
                replaced: replaced[seat],
                hand,
            });
        }
        results.sort_by(|a, b| b.evaluation.cmp(&a.evaluation).then(a.seat.cmp(&b.seat)));
        let winners: Vec<usize> = results
            .iter()
            .take_while(|r| r.evaluation == results[0].evaluation)
            .map(|r| r.seat)
            .collect();
        log::info!("draw: winners {winners:?} with {}", results[0].evaluation.category());
        Ok(DrawOutcome { results, winners })
    }

    fn ask_discards(&mut self, seat: usize, hand: &[Card]) -> Vec<usize> {
        let agent = &mut self.seats[seat].1;
        for attempt in 1..=self.max_retries {
            let err = match agent.discard(hand) {
                Ok(mut indices) => match validate_discards(&indices, hand.len()) {
                    Ok(()) => {
                        indices.sort_unstable();
                        return indices;
                    }
                    Err(e) => DecisionError::from(e),
                },
                Err(e) => e,
            };
            log::warn!("draw: seat {seat} discard rejected ({attempt}/{}): {err}", self.max_retries);
            if err.is_terminal() {
                break;
            }
            agent.rejected(&err);
        }
        log::warn!("draw: seat {seat} keeps their hand after failed discards");
        Vec::new()
    }
}

impl Default for DrawTable {
    fn default() -> Self {
        Self::new()
    }
}
