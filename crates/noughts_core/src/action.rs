//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They record who played
//! where, so a renderer can tell the human's last move from the
//! opponent's.

use super::phases::MatchState;
use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Index outside 0..9.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The request does not match whose turn the match is waiting on.
    #[display("Move not allowed while {}", _0)]
    OutOfTurn(MatchState),

    /// The opponent was asked to move on a board with no empty squares.
    #[display("No legal move available")]
    NoLegalMove,
}

impl MoveError {
    /// True for the errors a caller rejects as an invalid move.
    ///
    /// [`MoveError::NoLegalMove`] is a sequencing bug in the caller, not an
    /// invalid move.
    pub fn is_invalid_move(&self) -> bool {
        !matches!(self, MoveError::NoLegalMove)
    }
}

impl std::error::Error for MoveError {}
