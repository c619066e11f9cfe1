//! Headless matches between a random human and the opponent.

use crate::stats::{GameOutcome, Scoreboard};
use anyhow::{Context, Result};
use noughts_core::{Difficulty, Match, MatchState, RandomSource, random_empty};
use tracing::{debug, info, instrument};

/// Plays `games` matches and tallies them from the human's side.
///
/// The human picks uniformly among empty squares. The opponent replies
/// immediately.
#[instrument(skip(rng))]
pub fn simulate<R: RandomSource + ?Sized>(
    games: u32,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Scoreboard> {
    let mut tally = Scoreboard::default();

    for game_number in 0..games {
        let outcome = play_one(difficulty, rng)
            .with_context(|| format!("Simulated match {} failed", game_number))?;
        debug!(game_number, ?outcome, "Simulated match finished");
        tally.record(outcome);
    }

    info!(
        wins = tally.wins(),
        losses = tally.losses(),
        draws = tally.draws(),
        "Simulation complete"
    );
    Ok(tally)
}

fn play_one<R: RandomSource + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Result<GameOutcome> {
    let mut game = Match::new();

    loop {
        match game.state() {
            MatchState::AwaitingHuman => {
                let index = random_empty(game.board(), rng)
                    .context("Human has no empty square on an ongoing board")?;
                game.apply_human_move(index)?;
            }
            MatchState::OpponentThinking => {
                game.request_opponent_move(difficulty, rng)?;
            }
            MatchState::Terminal => {
                let outcome = game.outcome().context("Terminal match without outcome")?;
                debug!(board = %game.board().display(), %outcome, "Final board");
                return Ok(outcome.into());
            }
        }
    }
}

/// Formats a tally for the terminal.
pub fn report(difficulty: Difficulty, tally: &Scoreboard) -> String {
    format!(
        "{} opponent over {} matches\n  Human wins: {}\n  Opponent wins: {}\n  Draws: {}\n  Human win rate: {:.1}%",
        difficulty.label(),
        tally.total(),
        tally.wins(),
        tally.losses(),
        tally.draws(),
        tally.win_rate()
    )
}
