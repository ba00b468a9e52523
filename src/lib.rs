//! poker-table: a multi-player poker round simulator
//!
//! Goals:
//! - A betting-round state machine that never corrupts the pot: every action is
//!   validated before a single chip moves
//! - Deterministic hand ranking (best 5 of 7 by exhaustive search)
//! - Pluggable seats: humans, seeded bots, scripted agents
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: rank a hand
//! ```
//! use poker_table::cards::parse_cards;
//! use poker_table::evaluator::{evaluate, Category};
//!
//! let seven = parse_cards("As 2s 3s 4s 5h 9d Kc").unwrap();
//! let eval = evaluate(&seven).unwrap();
//! assert_eq!(eval.category(), Category::Straight);
//! ```
//!
//! ## Quick start: play a round between bots
//! ```
//! use poker_table::agents::{BotAgent, BotProfile};
//! use poker_table::game::Table;
//! use poker_table::player::Player;
//!
//! let mut table = Table::new(10, 20).with_seed(42);
//! for (i, seed) in [1u64, 2, 3].into_iter().enumerate() {
//!     let bot = BotAgent::new(BotProfile::cautious().with_seed(seed));
//!     table.seat(Player::new(format!("Bot {}", i + 1), 1000), Box::new(bot)).unwrap();
//! }
//! let outcome = table.play_round().unwrap();
//! assert!(!outcome.winners.is_empty());
//! assert_eq!(table.total_chips(), 3000);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin poker-table -- holdem --players 4
//! ```

pub mod action;
pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod display;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod player;
pub mod variants;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
