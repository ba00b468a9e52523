use poker_table::cards::Card;
use poker_table::deck::Deck;
use poker_table::evaluator::{evaluate, evaluate_five, evaluate_seven};
use proptest::prelude::*;
use std::cmp::Ordering;

/// Seven distinct cards drawn from a seeded shuffle.
fn any_seven() -> impl Strategy<Value = [Card; 7]> {
    any::<u64>().prop_map(|seed| {
        let cards = Deck::shuffled_seeded(seed).deal(7).unwrap();
        [cards[0], cards[1], cards[2], cards[3], cards[4], cards[5], cards[6]]
    })
}

fn subsets(cards: &[Card; 7]) -> Vec<[Card; 5]> {
    let mut out = Vec::new();
    for skip_a in 0..7 {
        for skip_b in skip_a + 1..7 {
            let kept: Vec<Card> = (0..7)
                .filter(|&i| i != skip_a && i != skip_b)
                .map(|i| cards[i])
                .collect();
            out.push([kept[0], kept[1], kept[2], kept[3], kept[4]]);
        }
    }
    out
}

proptest! {
    #[test]
    fn seven_card_result_is_the_best_subset(cards in any_seven()) {
        let best = evaluate_seven(&cards);
        let subs = subsets(&cards);
        prop_assert_eq!(subs.len(), 21);
        for five in &subs {
            prop_assert!(evaluate_five(five) <= best);
        }
        prop_assert!(subs.iter().any(|five| evaluate_five(five) == best));
    }

    #[test]
    fn evaluation_is_idempotent_and_order_free(cards in any_seven()) {
        let a = evaluate_seven(&cards);
        let mut reversed = cards;
        reversed.reverse();
        let b = evaluate_seven(&reversed);
        prop_assert_eq!(a.rank.clone(), b.rank.clone());
        prop_assert_eq!(evaluate(&cards).unwrap().rank, a.rank);
    }

    #[test]
    fn best_five_re_evaluates_to_the_same_rank(cards in any_seven()) {
        let e = evaluate_seven(&cards);
        prop_assert_eq!(evaluate_five(&e.best_five).rank, e.rank.clone());
        prop_assert!(e.best_five.iter().all(|c| cards.contains(c)));
    }

    #[test]
    fn comparison_is_a_total_order(a in any_seven(), b in any_seven(), c in any_seven()) {
        let (ea, eb, ec) = (evaluate_seven(&a), evaluate_seven(&b), evaluate_seven(&c));
        prop_assert_eq!(ea.cmp(&eb), eb.cmp(&ea).reverse());
        if ea >= eb && eb >= ec {
            prop_assert!(ea >= ec);
        }
        if ea.cmp(&eb) == Ordering::Equal {
            prop_assert_eq!(ea.category(), eb.category());
        }
    }
}
