//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::position::Position;
use super::rules;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark placed by a player.
///
/// X always moves first and belongs to the human; O belongs to the
/// computer opponent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Mark {
    /// The human's mark (moves first).
    #[display("X")]
    X,
    /// The opponent's mark.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Terminal status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    /// Moves remain and nobody has three in a row.
    Ongoing,
    /// The mark owns a complete line.
    WinFor(Mark),
    /// Board is full with no complete line.
    Draw,
}

impl Evaluation {
    /// Returns true for wins and draws.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Evaluation::Ongoing)
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from squares in row-major order.
    ///
    /// No consistency checks are made; see [`crate::BoardConsistent`].
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if the square at an index is empty. Out of range is never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Counts squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Indices of empty squares in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
    }

    /// Places `mark` at `index` and returns the new evaluation.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the board is already terminal
    /// - [`MoveError::OutOfRange`] if `index` is not in 0..9
    /// - [`MoveError::SquareOccupied`] if the square is taken
    ///
    /// The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<Evaluation, MoveError> {
        if self.evaluate().is_terminal() {
            return Err(MoveError::GameOver);
        }
        let pos = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        if !self.is_empty(index) {
            return Err(MoveError::SquareOccupied(pos));
        }

        self.squares[index] = Square::Occupied(mark);
        Ok(self.evaluate())
    }

    /// Evaluates the board.
    ///
    /// Lines are scanned in [`rules::LINES`] order and the first complete
    /// line decides the winner.
    pub fn evaluate(&self) -> Evaluation {
        if let Some(winner) = rules::check_winner(self) {
            Evaluation::WinFor(winner)
        } else if rules::is_full(self) {
            Evaluation::Draw
        } else {
            Evaluation::Ongoing
        }
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based key.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// A character other than `X`, `O`, `.`, `_` or `-`.
    #[display("Unexpected board character {:?}", _0)]
    UnexpectedChar(char),
    /// Wrong number of squares.
    #[display("Expected 9 squares, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for ParseBoardError {}

impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine squares, ignoring whitespace and `|`.
    ///
    /// `X`/`O` are marks; `.`, `_` and `-` are empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let square = match c.to_ascii_uppercase() {
                'X' => Square::Occupied(Mark::X),
                'O' => Square::Occupied(Mark::O),
                '.' | '_' | '-' => Square::Empty,
                other => return Err(ParseBoardError::UnexpectedChar(other)),
            };
            squares.push(square);
        }

        let len = squares.len();
        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|_| ParseBoardError::WrongLength(len))?;
        Ok(Self::from_squares(squares))
    }
}
