use std::cell::Cell;
use std::rc::Rc;

use poker_table::action::Action;
use poker_table::agents::{BotAgent, BotProfile, DecisionError, DecisionView, PlayerAgent};
use poker_table::game::Table;
use poker_table::player::Player;

/// Wraps a bot and counts refused decisions and folds made with a free check.
struct Audited {
    bot: BotAgent,
    rejected: Rc<Cell<u32>>,
    free_folds: Rc<Cell<u32>>,
}

impl PlayerAgent for Audited {
    fn decide(&mut self, view: &DecisionView<'_>) -> Result<Action, DecisionError> {
        let action = self.bot.decide(view)?;
        if action == Action::Fold && view.can_check() {
            self.free_folds.set(self.free_folds.get() + 1);
        }
        Ok(action)
    }

    fn rejected(&mut self, _error: &DecisionError) {
        self.rejected.set(self.rejected.get() + 1);
    }
}

type Counter = Rc<Cell<u32>>;

fn audited_table(profile: BotProfile, seats: u64, stack: u64) -> (Table, Counter, Counter) {
    let rejected = Rc::new(Cell::new(0));
    let free_folds = Rc::new(Cell::new(0));
    let mut table = Table::new(5, 10).with_seed(21);
    for i in 0..seats {
        let agent = Audited {
            bot: BotAgent::new(profile.clone().with_seed(100 + i)),
            rejected: Rc::clone(&rejected),
            free_folds: Rc::clone(&free_folds),
        };
        table.seat(Player::new(format!("Bot {i}"), stack), Box::new(agent)).unwrap();
    }
    (table, rejected, free_folds)
}

#[test]
fn bot_decisions_are_always_legal() {
    for profile in [BotProfile::uniform(), BotProfile::cautious()] {
        let (mut table, rejected, free_folds) = audited_table(profile, 5, 300);
        table.play(Some(100)).unwrap();
        assert_eq!(rejected.get(), 0);
        assert_eq!(free_folds.get(), 0);
        assert_eq!(table.total_chips(), 1500);
    }
}

#[test]
fn short_stacks_stay_legal() {
    // Stacks below the big blind force short calls and all-ins.
    let (mut table, rejected, _) = audited_table(BotProfile::uniform(), 4, 8);
    table.play(Some(50)).unwrap();
    assert_eq!(rejected.get(), 0);
    assert_eq!(table.total_chips(), 32);
}

#[test]
fn default_profile_is_cautious() {
    let bot = BotAgent::new(BotProfile::default());
    assert_eq!(bot.profile(), &BotProfile::cautious());
}
