use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::Category;

/// One category test. Detectors are tried in precedence order; the first match wins.
pub trait CategoryDetector {
    fn category(&self) -> Category;
    fn detect(&self, analysis: &HandAnalysis) -> bool;
}

pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn category(&self) -> Category {
        Category::RoyalFlush
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.suit_info.is_flush() && a.straight_info.top_rank == Some(Rank::Ace)
    }
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.suit_info.is_flush() && a.straight_info.is_straight()
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.quad().is_some()
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.has_full_house()
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.suit_info.is_flush()
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.straight_info.is_straight()
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.trips().is_some()
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        a.rank_groups.pairs().len() == 2
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> Category {
        Category::OnePair
    }
    fn detect(&self, a: &HandAnalysis) -> bool {
        !a.rank_groups.pairs().is_empty()
    }
}

pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }
    fn detect(&self, _a: &HandAnalysis) -> bool {
        true
    }
}

pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detectors_are_in_descending_precedence() {
        let cats: Vec<Category> = DETECTORS.iter().map(|d| d.category()).collect();
        assert!(cats.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(cats.len(), Category::ALL.len());
    }
}
