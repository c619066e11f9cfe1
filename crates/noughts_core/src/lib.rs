//! Noughts core - tic-tac-toe rules and a tiered computer opponent.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid, move validation, and win/draw evaluation
//! - **Opponent**: move selection for the Easy, Medium, and Hard tiers
//! - **Match**: the human-versus-opponent state machine
//!
//! The crate performs no I/O. Randomness comes in through [`RandomSource`]
//! so every decision can be replayed.
//!
//! # Example
//!
//! ```
//! use noughts_core::{Difficulty, Match, MatchState, RngSource};
//!
//! let mut game = Match::new();
//! let mut rng = RngSource::seeded(42);
//!
//! let view = game.apply_human_move(4)?;
//! assert_eq!(*view.state(), MatchState::OpponentThinking);
//!
//! let view = game.request_opponent_move(Difficulty::Hard, &mut rng)?;
//! assert_eq!(*view.state(), MatchState::AwaitingHuman);
//! # Ok::<(), noughts_core::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod controller;
mod difficulty;
mod invariants;
mod opponent;
mod phases;
mod position;
mod random;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use controller::{HUMAN, Match, MatchView};
pub use difficulty::Difficulty;
pub use invariants::{BoardConsistent, SingleWinner, assert_invariants};
pub use opponent::{
    OPPONENT, find_completing_move, find_completing_move_by_pairs, positional_fallback,
    random_empty, select_move,
};
pub use phases::{MatchState, Outcome};
pub use position::Position;
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use types::{Board, Evaluation, Mark, ParseBoardError, Square};
