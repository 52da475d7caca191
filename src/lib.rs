//! headsup-holdem: a heads-up Texas Hold'em engine
//!
//! - Hand evaluation: ten categories with tie-breaks, best five of up to seven cards
//! - Monte Carlo win percentage against a random opponent hand
//! - A computer opponent that profiles the human's action mix and bets by thresholds
//! - A resumable, serializable betting-round state machine
//! - Persisted player records and a terminal front-end
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use headsup_holdem::cards::{Card, Rank, Suit};
//! use headsup_holdem::evaluator::{evaluate_holdem, Category};
//! use headsup_holdem::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let best = evaluate_holdem(&hole, board.as_slice()).unwrap();
//! assert_eq!(best.category(), Category::OnePair);
//! assert_eq!(best.classification.to_string(), "Pair of Aces, King kicker");
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use headsup_holdem::agents::Action;
//! use headsup_holdem::config::TableConfig;
//! use headsup_holdem::game::{Continue, Game, Prompt};
//!
//! let mut game = Game::new(TableConfig::default(), 2024).unwrap();
//! let mut prompt = game.resume().unwrap();
//! for _ in 0..20 {
//!     prompt = match prompt {
//!         Prompt::AwaitAction { legal, .. } if legal.contains(Action::Check) => game.act(Action::Check).unwrap(),
//!         Prompt::AwaitAction { .. } => game.act(Action::Call).or_else(|_| game.act(Action::AllIn)).unwrap(),
//!         Prompt::HandOver(summary) if summary.is_match_over() => game.proceed(Continue::NewMatch).unwrap(),
//!         Prompt::HandOver(_) => game.proceed(Continue::NextRound).unwrap(),
//!     };
//! }
//! assert_eq!(game.total_chips(), 2 * game.config().round_buy_in);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin headsup-holdem -- --user alice
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod equity;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
