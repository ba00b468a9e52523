use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};
use crate::evaluator::{Category, Evaluation, HandRank};

/// Per-hand facts computed once and shared by every category detector.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub sorted_cards: [Card; 5],
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut sorted_cards = *cards;
        sorted_cards.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));

        let ranks = sorted_cards.map(Card::rank);
        Self {
            sorted_cards,
            rank_groups: RankGroups::from_ranks(&ranks),
            suit_info: SuitInfo::detect(&sorted_cards),
            straight_info: StraightInfo::detect(&ranks),
        }
    }

    /// Tiebreak key for `category`: a straight is keyed by its top card, every
    /// other category by ranks in (count desc, rank desc) order.
    pub fn tiebreak(&self, category: Category) -> Vec<Rank> {
        match (category, self.straight_info.top_rank) {
            (Category::Straight | Category::StraightFlush | Category::RoyalFlush, Some(top)) => {
                vec![top]
            }
            _ => self.rank_groups.ordered_ranks(),
        }
    }

    pub fn build_evaluation(&self, category: Category) -> Evaluation {
        let rank = HandRank::new(category, self.tiebreak(category));
        Evaluation { rank, best_five: self.sorted_cards }
    }
}
