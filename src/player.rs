use crate::cards::Card;

/// One seat at the table.
///
/// `street_contribution` is what the player has put in during the current
/// street; `round_contribution` accumulates across all streets of the round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) stack: u64,
    pub(crate) hole_cards: Vec<Card>,
    pub(crate) street_contribution: u64,
    pub(crate) round_contribution: u64,
    pub(crate) is_folded: bool,
    pub(crate) is_all_in: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u64) -> Self {
        Self {
            name: name.into(),
            stack,
            hole_cards: Vec::new(),
            street_contribution: 0,
            round_contribution: 0,
            is_folded: false,
            is_all_in: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    pub fn hole_cards(&self) -> &[Card] {
        &self.hole_cards
    }

    pub fn street_contribution(&self) -> u64 {
        self.street_contribution
    }

    pub fn round_contribution(&self) -> u64 {
        self.round_contribution
    }

    pub fn is_folded(&self) -> bool {
        self.is_folded
    }

    pub fn is_all_in(&self) -> bool {
        self.is_all_in
    }

    /// Still in the hand: not folded (all-in players still contest the pot).
    pub fn is_contesting(&self) -> bool {
        !self.is_folded
    }

    /// Can still make betting decisions.
    pub fn can_act(&self) -> bool {
        !self.is_folded && !self.is_all_in
    }

    /// Chips needed to match `current_bet`.
    pub fn owes(&self, current_bet: u64) -> u64 {
        current_bet.saturating_sub(self.street_contribution)
    }

    /// Move up to `amount` chips from the stack into this street's
    /// contribution. Returns what was actually committed; emptying the stack
    /// marks the player all-in.
    pub(crate) fn commit(&mut self, amount: u64) -> u64 {
        let pay = amount.min(self.stack);
        self.stack -= pay;
        self.street_contribution += pay;
        self.round_contribution += pay;
        if self.stack == 0 && pay > 0 {
            self.is_all_in = true;
        }
        pay
    }

    pub(crate) fn fold(&mut self) {
        self.is_folded = true;
    }

    pub(crate) fn award(&mut self, amount: u64) {
        self.stack += amount;
    }

    pub(crate) fn reset_for_round(&mut self) {
        self.hole_cards.clear();
        self.street_contribution = 0;
        self.round_contribution = 0;
        self.is_folded = false;
        self.is_all_in = false;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.street_contribution = 0;
    }

    /// Hole cards go back to the dealer once the round is settled.
    pub(crate) fn muck(&mut self) {
        self.hole_cards.clear();
    }

    /// Take back everything committed this round, as if it never started.
    pub(crate) fn refund(&mut self) {
        self.stack += self.round_contribution;
        self.reset_for_round();
    }
}
