//! Hand ranking.
//!
//! A [`HandRank`] is a category plus an ordered tiebreak key; two hands compare
//! by category first and then lexicographically by tiebreak. Sets larger than
//! five cards are ranked by exhaustively trying every five-card subset.

pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_distinct, HandError};
use core::cmp::Ordering;
use std::fmt;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::OnePair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Totally ordered hand strength. Field order matters: the derived `Ord`
/// compares `category` before `tiebreak`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank {
    category: Category,
    tiebreak: Vec<Rank>,
}

impl HandRank {
    pub fn new(category: Category, tiebreak: Vec<Rank>) -> Self {
        Self { category, tiebreak }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Ranks ordered by (count desc, rank desc); a straight's key is its top card.
    pub fn tiebreak(&self) -> &[Rank] {
        &self.tiebreak
    }
}

/// Detailed evaluation result. Only `rank` drives ordering.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Evaluation {
    pub rank: HandRank,
    pub best_five: [Card; 5],
}

impl Evaluation {
    pub fn category(&self) -> Category {
        self.rank.category
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Evaluation {}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("degenerate hand: need at least 5 cards, got {0}")]
    DegenerateHand(usize),
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
}

/// Evaluate exactly five cards; detects category and builds the tiebreak key.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);
    let category = DETECTORS
        .iter()
        .find(|d| d.detect(&analysis))
        .map_or(Category::HighCard, |d| d.category());
    analysis.build_evaluation(category)
}

/// Best five-card hand out of seven: all C(7,5) = 21 subsets are tried.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    best_of(cards)
}

/// Evaluate any set of at least five distinct cards, returning the best
/// five-card hand it contains.
///
/// ```
/// use poker_table::cards::parse_cards;
/// use poker_table::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("Ts Js Qs Ks As").unwrap();
/// assert_eq!(evaluate(&cards).unwrap().category(), Category::RoyalFlush);
///
/// let cards = parse_cards("2h 2d 2c 9s 9h").unwrap();
/// let eval = evaluate(&cards).unwrap();
/// assert_eq!(eval.category(), Category::FullHouse);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::DegenerateHand(cards.len()));
    }
    validate_distinct(cards)?;
    Ok(best_of(cards))
}

/// Compare two card sets by their best five-card hands.
pub fn compare(a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
    Ok(evaluate(a)?.cmp(&evaluate(b)?))
}

fn best_of(cards: &[Card]) -> Evaluation {
    use combinations::FiveCardSubsets;

    let mut best: Option<Evaluation> = None;
    for idx in FiveCardSubsets::new(cards.len()) {
        let hand = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let eval = evaluate_five(&hand);
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    // `cards.len() >= 5` is guaranteed by every caller, so at least one subset exists.
    best.unwrap_or_else(|| evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]))
}
