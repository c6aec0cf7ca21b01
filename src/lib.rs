//! poker-odds: Monte Carlo equity for a Hold'em hand against two random opponents.
//!
//! Goals:
//! - Stateless, re-entrant engine: every request builds its own deck and counters
//! - Category-only hand comparison (no kickers), straights and flushes over the whole hand
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: odds after the flop
//! ```
//! use poker_odds::config::SimulationConfig;
//! use poker_odds::request::OddsRequest;
//! use poker_odds::simulator::Simulator;
//!
//! let request = OddsRequest::new(["AS", "AH"]).with_board(["AD", "KC", "2S"]);
//! let simulator = Simulator::new(SimulationConfig::default().with_trials(5_000).with_seed(1));
//! let odds = request.evaluate(&simulator).unwrap();
//! assert!(odds.win > odds.lose);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --release -- AS AH --board "AD KC 2S" --json
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod request;
pub mod simulator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
