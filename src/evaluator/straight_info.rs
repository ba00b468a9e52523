use crate::cards::Rank;

const WHEEL_MASK: u16 = (1 << 14) | (1 << 2) | (1 << 3) | (1 << 4) | (1 << 5);

/// Whether five ranks form a straight, and its top card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Five distinct ranks spanning exactly four steps form a straight. The
    /// wheel (A-2-3-4-5) is also a straight; its top card is the Five.
    pub fn detect(ranks: &[Rank; 5]) -> Self {
        let mask = ranks.iter().fold(0u16, |m, r| m | (1 << r.value()));
        if mask.count_ones() != 5 {
            return StraightInfo { top_rank: None };
        }
        let hi = 15 - mask.leading_zeros() as u8;
        let lo = mask.trailing_zeros() as u8;
        let top_rank = if hi - lo == 4 {
            Rank::from_value(hi)
        } else if mask == WHEEL_MASK {
            Some(Rank::Five)
        } else {
            None
        };
        StraightInfo { top_rank }
    }

    pub fn is_straight(&self) -> bool {
        self.top_rank.is_some()
    }
}
