use poker_table::action::Action;
use poker_table::betting::{ActionError, BettingRound, StreetState};
use poker_table::player::Player;

fn mk_players(stacks: &[u64]) -> Vec<Player> {
    stacks.iter().enumerate().map(|(i, &s)| Player::new(format!("P{}", i + 1), s)).collect()
}

#[test]
fn fold_facing_a_bet_decides_the_hand() {
    let mut players = mk_players(&[1000, 1000]);
    let mut pot = 20;
    let mut round = BettingRound::open(&players, 0, 20);
    assert_eq!(round.to_call(&players[0]), 20);

    let state = round.apply(&mut players, &mut pot, Action::Fold).unwrap();
    assert_eq!(state, StreetState::DecidedByFold(1));
    assert!(players[0].is_folded());
    assert_eq!(pot, 20);
    assert_eq!(players[0].stack(), 1000);
}

#[test]
fn raising_the_whole_stack_leaves_no_further_obligation() {
    let mut players = mk_players(&[100, 300, 300]);
    let mut pot = 0;
    let mut round = BettingRound::open(&players, 0, 0);

    // P1 raises by 100: total contribution equals the whole stack.
    assert_eq!(round.max_raise(&players[0]), 100);
    round.apply(&mut players, &mut pot, Action::Raise(100)).unwrap();
    assert!(players[0].is_all_in());
    assert_eq!(players[0].stack(), 0);
    assert_eq!(round.to_act().collect::<Vec<_>>(), vec![1, 2]);

    // P2 re-raises; P1 is not asked again.
    let state = round.apply(&mut players, &mut pot, Action::Raise(100)).unwrap();
    assert_eq!(state, StreetState::AwaitingAction(2));
    assert_eq!(round.to_act().collect::<Vec<_>>(), vec![2]);
    assert_eq!(round.current_bet(), 200);

    let state = round.apply(&mut players, &mut pot, Action::Call).unwrap();
    assert_eq!(state, StreetState::StreetClosed);
    assert_eq!(pot, 500);
    assert_eq!(players.iter().map(|p| p.stack()).sum::<u64>() + pot, 700);
}

#[test]
fn illegal_actions_do_not_move_chips() {
    let mut players = mk_players(&[50, 500]);
    let mut pot = 0;
    let mut round = BettingRound::open(&players, 1, 0);
    round.apply(&mut players, &mut pot, Action::Raise(100)).unwrap();

    let before = (players.clone(), pot, round.clone());
    assert_eq!(
        round.apply(&mut players, &mut pot, Action::Check),
        Err(ActionError::CheckNotAllowed { to_call: 100 })
    );
    assert_eq!(
        round.apply(&mut players, &mut pot, Action::Raise(1)),
        Err(ActionError::RaiseNotPossible { to_call: 100, stack: 50 })
    );
    assert_eq!((players.clone(), pot, round.clone()), before);

    // A short call puts P1 all-in for what they have.
    let state = round.apply(&mut players, &mut pot, Action::Call).unwrap();
    assert_eq!(state, StreetState::StreetClosed);
    assert!(players[0].is_all_in());
    assert_eq!(pot, 150);
}

#[test]
fn raise_amount_bounds() {
    let mut players = mk_players(&[200, 200]);
    let mut pot = 0;
    let mut round = BettingRound::open(&players, 0, 0);
    assert_eq!(
        round.validate(&players, Action::Raise(0)),
        Err(ActionError::InvalidAmount { max: 200, got: 0 })
    );
    assert_eq!(
        round.validate(&players, Action::Raise(201)),
        Err(ActionError::InvalidAmount { max: 200, got: 201 })
    );
    assert_eq!(round.validate(&players, Action::Raise(200)), Ok(0));
    round.apply(&mut players, &mut pot, Action::Raise(200)).unwrap();
    assert!(players[0].is_all_in());
}

#[test]
fn actions_after_the_street_closes_are_rejected() {
    let mut players = mk_players(&[100, 100]);
    let mut pot = 0;
    let mut round = BettingRound::open(&players, 0, 0);
    round.apply(&mut players, &mut pot, Action::Check).unwrap();
    round.apply(&mut players, &mut pot, Action::Check).unwrap();
    assert_eq!(round.state(&players), StreetState::StreetClosed);
    assert_eq!(
        round.apply(&mut players, &mut pot, Action::Check),
        Err(ActionError::NotAwaitingAction)
    );
}
