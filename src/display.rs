//! Text rendering for terminal play.
//!
//! Everything here is a pure function from game values to strings. With
//! `color` set, red suits are styled through crossterm.

use crossterm::style::Stylize;

use crate::agents::DecisionView;
use crate::cards::Card;
use crate::game::{HandHistoryEntry, Payout, ShowdownHand, TableEvent};

pub fn card(c: Card, color: bool) -> String {
    let text = c.symbol();
    if color && c.suit().is_red() {
        text.red().to_string()
    } else {
        text
    }
}

pub fn cards(cs: &[Card], color: bool) -> String {
    if cs.is_empty() {
        return "--".to_string();
    }
    cs.iter().map(|&c| card(c, color)).collect::<Vec<_>>().join(" ")
}

/// Cards prefixed with their 1-based position, for discard prompts.
pub fn numbered_hand(hand: &[Card], color: bool) -> String {
    hand.iter()
        .enumerate()
        .map(|(i, &c)| format!("{}:{}", i + 1, card(c, color)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn decision_prompt(view: &DecisionView<'_>, color: bool) -> String {
    let mut options = vec![if view.can_check() { "check" } else { "call" }, "fold"];
    if view.max_raise() > 0 {
        options.push("raise <n>");
    }
    options.push("all-in");
    format!(
        "[{}] {} holds {} | board {} | pot {} | to call {} | stack {}\n{} > ",
        view.street,
        view.name,
        cards(view.hole_cards, color),
        cards(view.board, color),
        view.pot,
        view.to_call(),
        view.stack,
        options.join(" / "),
    )
}

pub fn history_line(name: &str, entry: &HandHistoryEntry) -> String {
    match entry.amount {
        Some(amount) => format!("{name}: {} {amount}", entry.verb.label()),
        None => format!("{name}: {}", entry.verb.label()),
    }
}

pub fn showdown_line(hand: &ShowdownHand, color: bool) -> String {
    format!(
        "{} shows {} -> {} ({})",
        hand.name,
        cards(&hand.hole_cards, color),
        hand.evaluation.category(),
        cards(&hand.evaluation.best_five, color),
    )
}

fn payout_line(p: &Payout) -> String {
    format!("{} collects {}", p.name, p.amount)
}

pub fn event_lines(event: &TableEvent, color: bool) -> Vec<String> {
    match event {
        TableEvent::RoundStarted { round, dealer, stacks } => {
            let seats: Vec<String> = stacks.iter().map(|(n, s)| format!("{n} ({s})")).collect();
            vec![format!("=== Round {round} | dealer {dealer} ==="), seats.join(", ")]
        }
        TableEvent::Dealt { cards: dealt } => {
            vec![format!("You are dealt {}", cards(dealt, color))]
        }
        TableEvent::StreetStarted { street, board, pot } => {
            vec![format!("--- {street} --- board {} | pot {pot}", cards(board, color))]
        }
        TableEvent::Acted { name, entry } => vec![history_line(name, entry)],
        TableEvent::Showdown { hands } => hands.iter().map(|h| showdown_line(h, color)).collect(),
        TableEvent::RoundEnded { payouts, .. } => payouts.iter().map(payout_line).collect(),
        TableEvent::Eliminated { name } => vec![format!("{name} is out of chips")],
        TableEvent::GameOver { winner: Some(name), rounds } => {
            vec![format!("{name} wins the game after {rounds} rounds")]
        }
        TableEvent::GameOver { winner: None, rounds } => {
            vec![format!("Game stopped after {rounds} rounds")]
        }
    }
}
