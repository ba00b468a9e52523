use crate::action::Action;
use crate::cards::Card;
use crate::evaluator::evaluate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{DecisionError, DecisionView, PlayerAgent};

/// Relative weights for each kind of decision, plus how much the bot lets
/// its hand strength bend those weights.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct BotProfile {
    pub fold: f64,
    pub check_call: f64,
    pub raise: f64,
    pub all_in: f64,
    /// 0.0 plays blind; 1.0 folds weak hands and raises strong ones.
    pub tightness: f64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Call, fold, raise and all-in are equally likely, regardless of cards.
    pub fn uniform() -> Self {
        Self {
            fold: 1.0,
            check_call: 1.0,
            raise: 1.0,
            all_in: 1.0,
            tightness: 0.0,
            rng_seed: None,
        }
    }

    /// Mostly calls, rarely shoves, and folds weak hands facing a bet.
    pub fn cautious() -> Self {
        Self {
            fold: 2.0,
            check_call: 6.0,
            raise: 1.0,
            all_in: 0.1,
            tightness: 0.6,
            rng_seed: None,
        }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::cautious()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Fold,
    CheckCall,
    Raise,
    AllIn,
}

/// A computer seat. All randomness comes from its own seeded RNG.
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    rng: ChaCha8Rng,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let seed = profile.rng_seed.unwrap_or_else(|| rand::rng().random());
        Self { profile, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    fn weights(&self, view: &DecisionView<'_>) -> [(Choice, f64); 4] {
        let p = &self.profile;
        let lean = p.tightness.clamp(0.0, 1.0);
        let strength = estimate_strength(view.hole_cards, view.board);
        // Folding for free never helps.
        let fold = if view.can_check() {
            0.0
        } else {
            p.fold * (1.0 - lean + lean * 2.0 * (1.0 - strength))
        };
        let raise = if view.max_raise() == 0 {
            0.0
        } else {
            p.raise * (1.0 - lean + lean * 2.0 * strength)
        };
        let all_in = p.all_in * (1.0 - lean + lean * strength * strength);
        [
            (Choice::Fold, fold.max(0.0)),
            (Choice::CheckCall, p.check_call.max(0.0)),
            (Choice::Raise, raise.max(0.0)),
            (Choice::AllIn, all_in.max(0.0)),
        ]
    }

    fn pick(&mut self, weights: &[(Choice, f64); 4]) -> Choice {
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Choice::CheckCall;
        }
        let mut roll = self.rng.random_range(0.0..total);
        for &(choice, w) in weights {
            if roll < w {
                return choice;
            }
            roll -= w;
        }
        Choice::CheckCall
    }
}

impl PlayerAgent for BotAgent {
    fn decide(&mut self, view: &DecisionView<'_>) -> Result<Action, DecisionError> {
        let weights = self.weights(view);
        let action = match self.pick(&weights) {
            Choice::Fold => Action::Fold,
            Choice::CheckCall if view.can_check() => Action::Check,
            Choice::CheckCall => Action::Call,
            Choice::Raise => Action::Raise(self.rng.random_range(1..=view.max_raise())),
            Choice::AllIn => Action::AllIn,
        };
        log::debug!("bot seat {} chose {action}", view.seat);
        Ok(action)
    }
}

/// Rough 0..=1 strength: pre-flop from the hole cards alone, afterwards from
/// the made hand's category.
fn estimate_strength(hole: &[Card], board: &[Card]) -> f64 {
    if board.is_empty() {
        return preflop_strength(hole);
    }
    let mut cards = Vec::with_capacity(hole.len() + board.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    match evaluate(&cards) {
        Ok(eval) => {
            let base = eval.category().ordinal() as f64 / 9.0;
            let high = eval.best_five[0].rank().value() as f64 / 14.0;
            (base * 0.85 + high * 0.15).clamp(0.0, 1.0)
        }
        Err(_) => preflop_strength(hole),
    }
}

fn preflop_strength(hole: &[Card]) -> f64 {
    let [a, b] = match hole {
        [a, b] => [*a, *b],
        _ => return 0.5,
    };
    let ra = a.rank().value() as i32;
    let rb = b.rank().value() as i32;
    let high = ra.max(rb) as f64;
    let low = ra.min(rb) as f64;
    let gap = (ra - rb).abs();

    let mut score = (high / 14.0) * 0.5 + (low / 14.0) * 0.1;
    if ra == rb {
        score += 0.3 + (high / 14.0) * 0.1;
    }
    if a.suit() == b.suit() {
        score += 0.05;
    }
    if gap == 1 {
        score += 0.05;
    } else if gap == 2 {
        score += 0.02;
    } else if gap > 4 {
        score -= 0.05;
    }
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::game::Street;

    fn view<'a>(hole: &'a [Card], board: &'a [Card], to_call: u64, stack: u64) -> DecisionView<'a> {
        DecisionView {
            seat: 0,
            name: "Bot",
            street: if board.is_empty() { Street::Preflop } else { Street::Flop },
            hole_cards: hole,
            board,
            pot: 60,
            current_bet: to_call,
            contribution: 0,
            stack,
        }
    }

    #[test]
    fn pairs_beat_trash_preflop() {
        let aa = parse_cards("As Ah").unwrap();
        let trash = parse_cards("7c 2d").unwrap();
        assert!(preflop_strength(&aa) > 0.8);
        assert!(preflop_strength(&trash) < 0.4);
    }

    #[test]
    fn made_hands_raise_strength() {
        let hole = parse_cards("Ks Kh").unwrap();
        let board = parse_cards("Kd 2c 7h").unwrap();
        let weak_board = parse_cards("9d 2c 5h").unwrap();
        let trips = estimate_strength(&hole, &board);
        let pair = estimate_strength(&hole, &weak_board);
        assert!(trips > pair);
    }

    #[test]
    fn never_folds_when_checking_is_free() {
        let hole = parse_cards("7c 2d").unwrap();
        let mut bot = BotAgent::new(BotProfile::uniform().with_seed(3));
        for _ in 0..200 {
            let action = bot.decide(&view(&hole, &[], 0, 100)).unwrap();
            assert_ne!(action, Action::Fold);
            assert_ne!(action, Action::Call);
        }
    }

    #[test]
    fn raises_stay_within_stack() {
        let hole = parse_cards("As Kd").unwrap();
        let mut bot = BotAgent::new(BotProfile::uniform().with_seed(11));
        let v = view(&hole, &[], 20, 50);
        for _ in 0..200 {
            if let Action::Raise(n) = bot.decide(&v).unwrap() {
                assert!((1..=30).contains(&n), "raise {n} out of range");
            }
        }
    }

    #[test]
    fn short_stack_never_raises() {
        let hole = parse_cards("As Kd").unwrap();
        let mut bot = BotAgent::new(BotProfile::uniform().with_seed(5));
        let v = view(&hole, &[], 40, 40);
        for _ in 0..100 {
            assert!(!matches!(bot.decide(&v).unwrap(), Action::Raise(_)));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let hole = parse_cards("Qc 8d").unwrap();
        let v = view(&hole, &[], 20, 200);
        let mut a = BotAgent::new(BotProfile::cautious().with_seed(42));
        let mut b = BotAgent::new(BotProfile::cautious().with_seed(42));
        let xs: Vec<Action> = (0..50).map(|_| a.decide(&v).unwrap()).collect();
        let ys: Vec<Action> = (0..50).map(|_| b.decide(&v).unwrap()).collect();
        assert_eq!(xs, ys);
    }
}
