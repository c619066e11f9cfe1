//! Computer opponent move selection.
//!
//! The opponent always plays O. Each [`Difficulty`] maps to a heuristic:
//!
//! - **Easy**: uniformly random empty square.
//! - **Medium**: 70% of the time win, block, or take the best square;
//!   otherwise a random square.
//! - **Hard**: always win, then block, then take the best square.
//!
//! "Best square" is the positional fallback: center, then a random corner,
//! then a random edge.
//!
//! All finders return `Option<usize>`. Index 0 is a valid answer.

use super::difficulty::Difficulty;
use super::random::RandomSource;
use super::rules::LINES;
use super::{Board, Mark, MoveError, Position, Square};
use tracing::{debug, instrument};

/// Mark played by the opponent.
pub const OPPONENT: Mark = Mark::O;

/// Medium plays the smart line for this many draws out of [`MEDIUM_SCALE`].
const MEDIUM_SMART_WEIGHT: usize = 7;
const MEDIUM_SCALE: usize = 10;

/// Selects the opponent's next square.
///
/// Call only when the board is ongoing and O is to move.
///
/// # Errors
///
/// Returns [`MoveError::NoLegalMove`] if the board has no empty squares.
#[instrument(skip(board, rng), fields(board = %board.display()))]
pub fn select_move<R: RandomSource + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, MoveError> {
    if board.empty_cells().next().is_none() {
        return Err(MoveError::NoLegalMove);
    }

    let choice = match difficulty {
        Difficulty::Easy => random_empty(board, rng),
        Difficulty::Medium => {
            if rng.next_uniform(MEDIUM_SCALE) < MEDIUM_SMART_WEIGHT {
                debug!("Medium playing smart");
                find_completing_move_by_pairs(board, OPPONENT)
                    .or_else(|| find_completing_move_by_pairs(board, OPPONENT.opponent()))
                    .or_else(|| positional_fallback(board, rng))
            } else {
                debug!("Medium playing random");
                random_empty(board, rng)
            }
        }
        Difficulty::Hard => find_completing_move(board, OPPONENT)
            .inspect(|index| debug!(index, "Taking the win"))
            .or_else(|| {
                find_completing_move(board, OPPONENT.opponent())
                    .inspect(|index| debug!(index, "Blocking"))
            })
            .or_else(|| positional_fallback(board, rng)),
    };

    let index = choice.ok_or(MoveError::NoLegalMove)?;
    debug!(index, ?difficulty, "Opponent selected square");
    Ok(index)
}

/// Finds the empty square that completes a line for `mark`.
///
/// A line qualifies when it holds exactly two of `mark` and one empty
/// square. Lines are scanned in [`LINES`] order; the first match wins.
#[instrument(skip(board))]
pub fn find_completing_move(board: &Board, mark: Mark) -> Option<usize> {
    let squares = board.squares();
    LINES.iter().find_map(|line| {
        let owned = line
            .iter()
            .filter(|&&i| squares[i] == Square::Occupied(mark))
            .count();
        if owned != 2 {
            return None;
        }
        line.iter().copied().find(|&i| squares[i] == Square::Empty)
    })
}

/// Same answer as [`find_completing_move`], found by matching each pair
/// of a line exactly: `(a, b)` with `c` empty, `(a, c)` with `b` empty,
/// then `(b, c)` with `a` empty.
#[instrument(skip(board))]
pub fn find_completing_move_by_pairs(board: &Board, mark: Mark) -> Option<usize> {
    let squares = board.squares();
    let own = Square::Occupied(mark);
    LINES.iter().find_map(|&[a, b, c]| {
        if squares[a] == own && squares[b] == own && squares[c] == Square::Empty {
            Some(c)
        } else if squares[a] == own && squares[c] == own && squares[b] == Square::Empty {
            Some(b)
        } else if squares[b] == own && squares[c] == own && squares[a] == Square::Empty {
            Some(a)
        } else {
            None
        }
    })
}

/// Center, else a random empty corner, else a random empty edge, else the
/// lowest empty square.
#[instrument(skip(board, rng))]
pub fn positional_fallback<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let center = Position::Center.to_index();
    if board.is_empty(center) {
        return Some(center);
    }

    let corners = empty_among(board, &Position::CORNERS);
    if let Some(corner) = pick(&corners, rng) {
        return Some(corner);
    }

    let edges = empty_among(board, &Position::EDGES);
    if let Some(edge) = pick(&edges, rng) {
        return Some(edge);
    }

    board.empty_cells().next()
}

/// Uniformly random empty square.
#[instrument(skip(board, rng))]
pub fn random_empty<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let empty: Vec<usize> = board.empty_cells().collect();
    pick(&empty, rng)
}

fn empty_among(board: &Board, positions: &[Position]) -> Vec<usize> {
    positions
        .iter()
        .map(|pos| pos.to_index())
        .filter(|&i| board.is_empty(i))
        .collect()
}

fn pick<R: RandomSource + ?Sized>(candidates: &[usize], rng: &mut R) -> Option<usize> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.next_uniform(candidates.len())])
    }
}
