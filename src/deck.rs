use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("cannot deal {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// A standard 52-card deck, consumed from the top. Cards never return to the
/// deck, so no card can be dealt twice within a round.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use poker_table::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    /// A fresh deck shuffled with a seeded RNG, reproducible across runs.
    pub fn shuffled_seeded(seed: u64) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_seeded(seed);
        deck
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deal `n` cards from the top. On failure the deck is left untouched.
    ///
    /// ```
    /// use poker_table::deck::{Deck, DeckError};
    ///
    /// let mut deck = Deck::shuffled_seeded(1);
    /// assert_eq!(deck.deal(50).unwrap().len(), 50);
    /// assert_eq!(
    ///     deck.deal(3),
    ///     Err(DeckError::InsufficientCards { requested: 3, remaining: 2 })
    /// );
    /// assert_eq!(deck.remaining(), 2);
    /// ```
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.cards.len();
        if n > remaining {
            return Err(DeckError::InsufficientCards { requested: n, remaining });
        }
        let mut dealt = self.cards.split_off(remaining - n);
        dealt.reverse();
        Ok(dealt)
    }
}
