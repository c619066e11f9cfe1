//! Match controller: the human against the computer opponent.
//!
//! ```text
//! AwaitingHuman --human move--> OpponentThinking --opponent move--> AwaitingHuman
//!       |                              |
//!       +--------win or draw-----------+----------> Terminal
//! ```
//!
//! `reset` returns any state to `AwaitingHuman` with a fresh board and
//! abandons a pending opponent move. Each transition returns a
//! [`MatchView`] for the renderer.

use super::action::{Move, MoveError};
use super::difficulty::Difficulty;
use super::invariants::assert_invariants;
use super::opponent::{self, OPPONENT};
use super::phases::{MatchState, Outcome};
use super::random::RandomSource;
use super::rules::winning_line;
use super::{Board, Evaluation, Mark, Position, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Mark played by the human.
pub const HUMAN: Mark = Mark::X;

/// Read-only snapshot of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MatchView {
    /// Squares in row-major order.
    cells: [Square; 9],
    /// Current phase.
    state: MatchState,
    /// Set once the match is terminal.
    outcome: Option<Outcome>,
    /// The line that won, for highlighting.
    winning_line: Option<[usize; 3]>,
    /// Most recent accepted move.
    last_move: Option<Move>,
}

impl MatchView {
    /// True once the match is won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.state == MatchState::Terminal
    }

    /// True if `index` is part of the winning line.
    pub fn is_winning_cell(&self, index: usize) -> bool {
        self.winning_line.is_some_and(|line| line.contains(&index))
    }
}

/// A single match between the human (X) and the opponent (O).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    board: Board,
    to_move: Mark,
    state: MatchState,
    outcome: Option<Outcome>,
    last_move: Option<Move>,
}

impl Match {
    /// Creates a new match: empty board, X to move, awaiting the human.
    #[instrument]
    pub fn new() -> Self {
        info!("New match");
        Self {
            board: Board::new(),
            to_move: HUMAN,
            state: MatchState::AwaitingHuman,
            outcome: None,
            last_move: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the current phase.
    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Returns the outcome once terminal.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> MatchView {
        MatchView {
            cells: *self.board.squares(),
            state: self.state,
            outcome: self.outcome,
            winning_line: winning_line(&self.board),
            last_move: self.last_move,
        }
    }

    /// Places the human's mark at `index`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the match is terminal
    /// - [`MoveError::OutOfTurn`] while the opponent is thinking
    /// - [`MoveError::OutOfRange`] / [`MoveError::SquareOccupied`] from the board
    ///
    /// The match is unchanged on error.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<MatchView, MoveError> {
        match self.state {
            MatchState::AwaitingHuman => {}
            MatchState::Terminal => {
                warn!(index, "Human move after the match ended");
                return Err(MoveError::GameOver);
            }
            state @ MatchState::OpponentThinking => {
                warn!(index, "Human move while the opponent is thinking");
                return Err(MoveError::OutOfTurn(state));
            }
        }

        self.play(index, HUMAN, MatchState::OpponentThinking)
    }

    /// Lets the opponent choose and place its mark.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the match is terminal
    /// - [`MoveError::OutOfTurn`] while awaiting the human
    /// - [`MoveError::NoLegalMove`] if the board has no empty square
    #[instrument(skip(self, rng), fields(state = %self.state))]
    pub fn request_opponent_move<R: RandomSource + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<MatchView, MoveError> {
        match self.state {
            MatchState::OpponentThinking => {}
            MatchState::Terminal => {
                warn!("Opponent move requested after the match ended");
                return Err(MoveError::GameOver);
            }
            state @ MatchState::AwaitingHuman => {
                warn!("Opponent move requested while awaiting the human");
                return Err(MoveError::OutOfTurn(state));
            }
        }

        let index = opponent::select_move(&self.board, difficulty, rng)?;
        self.play(index, OPPONENT, MatchState::AwaitingHuman)
    }

    /// Abandons the current match and starts a fresh one.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn reset(&mut self) -> MatchView {
        *self = Self::new();
        self.view()
    }

    fn play(&mut self, index: usize, mark: Mark, next: MatchState) -> Result<MatchView, MoveError> {
        debug_assert_eq!(mark, self.to_move);

        let evaluation = self.board.place(index, mark).inspect_err(|e| {
            warn!(index, %mark, error = %e, "Move rejected");
        })?;
        let position = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        self.last_move = Some(Move::new(mark, position));
        debug!(index, %mark, "Move applied");

        match evaluation {
            Evaluation::Ongoing => {
                self.to_move = mark.opponent();
                self.state = next;
            }
            Evaluation::WinFor(winner) => self.finish(Outcome::Winner(winner)),
            Evaluation::Draw => self.finish(Outcome::Draw),
        }

        assert_invariants(&self.board);
        Ok(self.view())
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(%outcome, board = %self.board.display(), "Match over");
        self.state = MatchState::Terminal;
        self.outcome = Some(outcome);
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn test_new_match() {
        let m = Match::new();
        assert_eq!(m.state(), MatchState::AwaitingHuman);
        assert_eq!(m.to_move(), Mark::X);
        assert_eq!(m.board(), &Board::new());
        assert_eq!(m.outcome(), None);
    }

    #[test]
    fn test_human_move_hands_turn_to_opponent() {
        let mut m = Match::new();
        let view = m.apply_human_move(4).unwrap();
        assert_eq!(*view.state(), MatchState::OpponentThinking);
        assert_eq!(view.cells()[4], Square::Occupied(Mark::X));
        assert_eq!(
            *view.last_move(),
            Some(Move::new(Mark::X, Position::Center))
        );
        assert_eq!(m.to_move(), Mark::O);
    }

    #[test]
    fn test_human_move_rejected_while_thinking() {
        let mut m = Match::new();
        m.apply_human_move(0).unwrap();
        let before = m.clone();
        assert_eq!(
            m.apply_human_move(1),
            Err(MoveError::OutOfTurn(MatchState::OpponentThinking))
        );
        assert_eq!(m, before);
    }

    #[test]
    fn test_opponent_rejected_while_awaiting_human() {
        let mut m = Match::new();
        let mut rng = ScriptedRandom::new([0]);
        assert_eq!(
            m.request_opponent_move(Difficulty::Hard, &mut rng),
            Err(MoveError::OutOfTurn(MatchState::AwaitingHuman))
        );
    }

    #[test]
    fn test_invalid_human_move_leaves_match_unchanged() {
        let mut m = Match::new();
        let mut rng = ScriptedRandom::new([0]);
        m.apply_human_move(0).unwrap();
        m.request_opponent_move(Difficulty::Hard, &mut rng).unwrap();
        let before = m.clone();

        assert_eq!(
            m.apply_human_move(0),
            Err(MoveError::SquareOccupied(Position::TopLeft))
        );
        assert_eq!(m.apply_human_move(12), Err(MoveError::OutOfRange(12)));
        assert_eq!(m, before);
    }

    #[test]
    fn test_opponent_win_is_terminal() {
        let mut m = Match::new();
        let mut rng = ScriptedRandom::new([0]);
        // X 0, O takes center, X 1, O blocks at 2.
        m.apply_human_move(0).unwrap();
        m.request_opponent_move(Difficulty::Hard, &mut rng).unwrap();
        m.apply_human_move(1).unwrap();
        let view = m.request_opponent_move(Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(view.cells()[2], Square::Occupied(Mark::O));

        // X plays 8; O has 2 and 4, completes 2-4-6.
        m.apply_human_move(8).unwrap();
        let view = m.request_opponent_move(Difficulty::Hard, &mut rng).unwrap();
        assert!(view.is_terminal());
        assert_eq!(*view.outcome(), Some(Outcome::Winner(Mark::O)));
        assert_eq!(*view.winning_line(), Some([2, 4, 6]));
        assert!(view.is_winning_cell(6));
        assert!(!view.is_winning_cell(0));

        assert_eq!(m.apply_human_move(3), Err(MoveError::GameOver));
        assert_eq!(
            m.request_opponent_move(Difficulty::Hard, &mut rng),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut m = Match::new();
        m.apply_human_move(4).unwrap();
        let view = m.reset();
        assert_eq!(*view.state(), MatchState::AwaitingHuman);
        assert_eq!(m, Match::new());
    }
}
