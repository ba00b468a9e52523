use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// Reject any card that appears more than once.
pub fn validate_distinct(cards: &[Card]) -> Result<(), HandError> {
    let mut seen = HashSet::with_capacity(cards.len());
    for &c in cards {
        if !seen.insert(c) {
            return Err(HandError::DuplicateCard(c));
        }
    }
    Ok(())
}

/// Community cards shared by every player (flop, turn, river).
///
/// ```
/// use poker_table::cards::{Card, Rank, Suit};
/// use poker_table::hand::Board;
///
/// let board = Board::try_new(vec![
///     Card::new(Rank::Two, Suit::Clubs),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Clubs),
/// ]).unwrap();
/// assert_eq!(board.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX_CARDS: usize = 5;

    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(Self::MAX_CARDS) }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX_CARDS {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        validate_distinct(&cards)?;
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Combine private cards with the board into one evaluable set.
    pub fn with_hole(&self, hole: &[Card]) -> Vec<Card> {
        let mut all = Vec::with_capacity(hole.len() + self.cards.len());
        all.extend_from_slice(hole);
        all.extend_from_slice(&self.cards);
        all
    }

    pub(crate) fn extend<I>(&mut self, cards: I) -> Result<(), HandError>
    where
        I: IntoIterator<Item = Card>,
    {
        let mut next = self.cards.clone();
        next.extend(cards);
        *self = Board::try_new(next)?;
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}
