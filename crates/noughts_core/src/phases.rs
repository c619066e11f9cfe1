//! Match phases and outcomes.

use super::Mark;
use serde::{Deserialize, Serialize};

/// Phase of a match.
///
/// `OpponentThinking` covers the pause between the human's move and the
/// opponent's reply; human moves are rejected while in it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum MatchState {
    /// Waiting for X.
    #[default]
    #[display("awaiting the human move")]
    AwaitingHuman,
    /// Waiting for the opponent to reply.
    #[display("the opponent is thinking")]
    OpponentThinking,
    /// Won or drawn. Absorbing until reset.
    #[display("the match is over")]
    Terminal,
}

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The mark won the match.
    Winner(Mark),
    /// Match ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
