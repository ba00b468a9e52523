use crate::cards::Rank;

/// Ranks grouped by multiplicity, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    pub fn from_ranks(ranks: &[Rank]) -> Self {
        let mut counts = [0u8; 15];
        for r in ranks {
            counts[r.value() as usize] += 1;
        }
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .map(|&r| (r, counts[r.value() as usize]))
            .filter(|&(_, c)| c > 0)
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    fn with_count(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups.iter().filter(move |(_, c)| *c == n).map(|(r, _)| *r)
    }

    pub fn quad(&self) -> Option<Rank> {
        self.with_count(4).next()
    }

    pub fn trips(&self) -> Option<Rank> {
        self.with_count(3).next()
    }

    /// Pair ranks, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2).collect()
    }

    /// Exactly one triple and one pair.
    pub fn has_full_house(&self) -> bool {
        self.with_count(3).count() == 1 && self.with_count(2).count() == 1
    }

    /// Distinct ranks in group order; this is the generic tiebreak key.
    pub fn ordered_ranks(&self) -> Vec<Rank> {
        self.groups.iter().map(|(r, _)| *r).collect()
    }
}
