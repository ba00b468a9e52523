use crate::cards::{Card, Suit};

/// Per-suit counts of a five-card hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    counts: [u8; 4],
}

impl SuitInfo {
    pub fn detect(cards: &[Card; 5]) -> Self {
        let mut counts = [0u8; 4];
        for c in cards {
            counts[c.suit() as usize] += 1;
        }
        SuitInfo { counts }
    }

    pub fn count(&self, suit: Suit) -> u8 {
        self.counts[suit as usize]
    }

    /// A flush is exactly one suit present among the evaluated cards.
    pub fn is_flush(&self) -> bool {
        self.counts.iter().filter(|&&n| n > 0).count() == 1
    }

    pub fn flush_suit(&self) -> Option<Suit> {
        if !self.is_flush() {
            return None;
        }
        Suit::ALL.iter().copied().find(|&s| self.count(s) > 0)
    }
}
