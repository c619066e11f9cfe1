//! Tests for board evaluation and move placement.

use noughts_core::{Board, Evaluation, Mark, MoveError, Square, rules::LINES};

#[test]
fn test_every_line_wins_for_both_marks() {
    for mark in [Mark::X, Mark::O] {
        for line in LINES {
            let mut squares = [Square::Empty; 9];
            for i in line {
                squares[i] = Square::Occupied(mark);
            }
            let board = Board::from_squares(squares);
            assert_eq!(
                board.evaluate(),
                Evaluation::WinFor(mark),
                "line {:?} for {}",
                line,
                mark
            );
        }
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board: Board = "XOX XOO OXX".parse().unwrap();
    assert_eq!(board.evaluate(), Evaluation::Draw);
}

#[test]
fn test_empty_board_is_ongoing() {
    assert_eq!(Board::new().evaluate(), Evaluation::Ongoing);
    assert_eq!(Board::new().empty_cells().count(), 9);
}

#[test]
fn test_win_on_last_square_beats_draw() {
    let mut board: Board = "XOX OXO OX.".parse().unwrap();
    assert_eq!(board.place(8, Mark::X), Ok(Evaluation::WinFor(Mark::X)));
}

#[test]
fn test_invalid_places_leave_board_unchanged() {
    let mut board: Board = "X.. .O. ...".parse().unwrap();
    let before = board;

    for index in [0, 4] {
        assert!(matches!(
            board.place(index, Mark::X),
            Err(MoveError::SquareOccupied(_))
        ));
    }
    for index in [9, 10, usize::MAX] {
        assert_eq!(board.place(index, Mark::X), Err(MoveError::OutOfRange(index)));
    }
    assert_eq!(board, before);
}

#[test]
fn test_board_serializes() {
    let board: Board = "X.. .O. ...".parse().unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}
