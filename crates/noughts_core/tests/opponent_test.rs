//! Tests for the computer opponent's tiers.

use noughts_core::{
    Board, Difficulty, MoveError, RngSource, ScriptedRandom, positional_fallback, select_move,
};

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

#[test]
fn test_hard_blocks_forced_loss() {
    let b = board("XX. .O. ...");
    for seed in 0..10 {
        let mut rng = RngSource::seeded(seed);
        assert_eq!(select_move(&b, Difficulty::Hard, &mut rng), Ok(2));
    }
}

#[test]
fn test_hard_completes_own_line() {
    let b = board("OO. .X. ...");
    for seed in 0..10 {
        let mut rng = RngSource::seeded(seed);
        assert_eq!(select_move(&b, Difficulty::Hard, &mut rng), Ok(2));
    }
}

#[test]
fn test_hard_takes_center_without_threats() {
    let b = board("X.. ... ...");
    let mut rng = ScriptedRandom::new([5]);
    assert_eq!(select_move(&b, Difficulty::Hard, &mut rng), Ok(4));
}

#[test]
fn test_fallback_center_on_empty_board() {
    let mut rng = ScriptedRandom::new([0]);
    assert_eq!(positional_fallback(&Board::new(), &mut rng), Some(4));
}

#[test]
fn test_easy_is_reproducible() {
    let b = board("X.. ... ...");
    let play = |values: Vec<usize>| {
        let mut rng = ScriptedRandom::new(values);
        (0..8)
            .map(|_| select_move(&b, Difficulty::Easy, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };

    let first = play(vec![3, 1, 4, 1, 5, 9, 2, 6]);
    let second = play(vec![3, 1, 4, 1, 5, 9, 2, 6]);
    assert_eq!(first, second);
    // Empty squares are 1..=8; value v picks the (v % 8)-th.
    assert_eq!(first, vec![4, 2, 5, 2, 6, 2, 3, 7]);
}

#[test]
fn test_seeded_easy_only_picks_empty_squares() {
    let b = board("XOX .O. X..");
    let mut rng = RngSource::seeded(99);
    for _ in 0..100 {
        let index = select_move(&b, Difficulty::Easy, &mut rng).unwrap();
        assert!(b.is_empty(index));
    }
}

#[test]
fn test_medium_mixes_smart_and_random() {
    // With X threatening 2, smart play always blocks; random play sometimes
    // does not.
    let b = board("XX. .O. ...");
    let mut rng = RngSource::seeded(1234);
    let picks: Vec<usize> = (0..400)
        .map(|_| select_move(&b, Difficulty::Medium, &mut rng).unwrap())
        .collect();

    let blocks = picks.iter().filter(|&&i| i == 2).count();
    assert!(blocks > 250, "blocked only {} of 400", blocks);
    assert!(blocks < 400, "never played randomly");
}

#[test]
fn test_no_legal_move_on_full_board() {
    let b = board("XOX XOO OXX");
    let mut rng = ScriptedRandom::new([0]);
    assert_eq!(
        select_move(&b, Difficulty::Hard, &mut rng),
        Err(MoveError::NoLegalMove)
    );
    assert!(!MoveError::NoLegalMove.is_invalid_move());
}
