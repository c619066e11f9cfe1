//! Board invariants checked after every controller transition.

use super::rules::LINES;
use super::{Board, Mark};
use tracing::{instrument, warn};

/// Invariant: X moves first, so X count minus O count is 0 or 1.
pub struct BoardConsistent;

impl BoardConsistent {
    /// Checks the invariant.
    #[instrument(skip(board))]
    pub fn holds(board: &Board) -> bool {
        let x_count = board.count(Mark::X);
        let o_count = board.count(Mark::O);

        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Board consistency violated");
        }
        valid
    }
}

/// Invariant: complete lines never belong to two different marks.
pub struct SingleWinner;

impl SingleWinner {
    /// Checks the invariant.
    #[instrument(skip(board))]
    pub fn holds(board: &Board) -> bool {
        let squares = board.squares();
        let mut winners = LINES.iter().filter_map(|&[a, b, c]| {
            let mark = squares[a].mark()?;
            (squares[b] == squares[a] && squares[c] == squares[a]).then_some(mark)
        });

        let valid = match winners.next() {
            Some(first) => winners.all(|m| m == first),
            None => true,
        };
        if !valid {
            warn!(board = %board.display(), "Two different winners on one board");
        }
        valid
    }
}

/// Asserts that all board invariants hold (panics on violation in debug builds).
#[instrument(skip(board))]
pub fn assert_invariants(board: &Board) {
    debug_assert!(BoardConsistent::holds(board), "Board consistency violated");
    debug_assert!(SingleWinner::holds(board), "Two different winners on one board");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_boards() {
        assert!(BoardConsistent::holds(&Board::new()));
        assert!(BoardConsistent::holds(&"X.. ... ...".parse().unwrap()));
        assert!(BoardConsistent::holds(&"XO. ... ...".parse().unwrap()));
    }

    #[test]
    fn test_inconsistent_boards() {
        assert!(!BoardConsistent::holds(&"O.. ... ...".parse().unwrap()));
        assert!(!BoardConsistent::holds(&"XX. ... ...".parse().unwrap()));
    }

    #[test]
    fn test_single_winner() {
        assert!(SingleWinner::holds(&"XXX OO. ...".parse().unwrap()));
        // Two lines, same mark.
        assert!(SingleWinner::holds(&"XXX X.. X..".parse().unwrap()));
        assert!(!SingleWinner::holds(&"XXX OOO ...".parse().unwrap()));
    }
}
