//! Application state and logic.

use super::input::{digit_square, move_cursor};
use crate::stats::{GameOutcome, Scoreboard, StatsStore};
use crossterm::event::KeyCode;
use noughts_core::{
    Difficulty, HUMAN, Match, MatchState, MatchView, MoveError, Position, RandomSource,
};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the terminal UI.
    Quit,
}

/// Main application state.
///
/// The opponent's reply is scheduled as a deadline rather than a timer, so
/// the event loop decides when to call [`App::tick`] and tests can pass any
/// instant they like.
pub struct App<R> {
    game: Match,
    view: MatchView,
    difficulty: Difficulty,
    cursor: Position,
    delay: Duration,
    pending: Option<Instant>,
    session: Scoreboard,
    stats: StatsStore,
    profile: String,
    notice: Option<String>,
    rng: R,
}

impl<R: RandomSource> App<R> {
    /// Creates an app with a fresh match.
    pub fn new(
        difficulty: Difficulty,
        delay: Duration,
        profile: String,
        stats: StatsStore,
        rng: R,
    ) -> Self {
        let game = Match::new();
        let view = game.view();
        Self {
            game,
            view,
            difficulty,
            cursor: Position::Center,
            delay,
            pending: None,
            session: Scoreboard::default(),
            stats,
            profile,
            notice: None,
            rng,
        }
    }

    /// Latest snapshot of the match.
    pub fn view(&self) -> &MatchView {
        &self.view
    }

    /// Current opponent tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Results for this session.
    pub fn session(&self) -> &Scoreboard {
        &self.session
    }

    /// Results recorded for the active profile across sessions.
    pub fn profile_record(&self) -> Scoreboard {
        self.stats.get(&self.profile)
    }

    /// Active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// When the opponent is due to reply, if a reply is pending.
    pub fn opponent_deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Transient message about the last rejected action.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Headline for the status bar.
    pub fn status_line(&self) -> &'static str {
        match (self.view.state(), self.view.outcome()) {
            (MatchState::AwaitingHuman, _) => "Your Turn (X)",
            (MatchState::OpponentThinking, _) => "Computer thinking...",
            (MatchState::Terminal, Some(outcome)) => match outcome.winner() {
                Some(mark) if mark == HUMAN => "You Win!",
                Some(_) => "Computer Wins!",
                None => "Game Draw!",
            },
            (MatchState::Terminal, None) => "Game Over",
        }
    }

    /// Handles one key press at time `now`.
    #[instrument(skip(self, now))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) -> Flow {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Flow::Quit;
            }
            KeyCode::Char('n') | KeyCode::Char('r') => self.new_match(),
            KeyCode::Char('d') => {
                self.difficulty = self.difficulty.next();
                info!(difficulty = %self.difficulty, "Difficulty changed");
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.human_move(self.cursor.to_index(), now);
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            other => {
                if let Some(index) = digit_square(other) {
                    if let Some(pos) = Position::from_index(index) {
                        self.cursor = pos;
                    }
                    self.human_move(index, now);
                }
            }
        }
        Flow::Continue
    }

    /// Plays the opponent's reply if its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.pending.is_some_and(|deadline| now >= deadline) {
            self.play_opponent();
        }
    }

    /// Plays the opponent's reply immediately.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn play_opponent(&mut self) {
        self.pending = None;

        match self.game.request_opponent_move(self.difficulty, &mut self.rng) {
            Ok(view) => {
                debug!(last_move = ?view.last_move(), "Opponent moved");
                self.view = view;
                self.after_move();
            }
            Err(MoveError::NoLegalMove) => {
                error!(state = %self.game.state(), "Opponent asked to move on a full board");
                debug_assert!(
                    self.game.board().empty_cells().next().is_some(),
                    "opponent asked to move on a full board"
                );
            }
            Err(e) => {
                warn!(error = %e, "Opponent move rejected");
            }
        }
    }

    fn human_move(&mut self, index: usize, now: Instant) {
        match self.game.apply_human_move(index) {
            Ok(view) => {
                self.view = view;
                self.notice = None;
                if *view.state() == MatchState::OpponentThinking {
                    self.pending = Some(now + self.delay);
                    debug!(delay_ms = self.delay.as_millis() as u64, "Opponent reply scheduled");
                }
                self.after_move();
            }
            Err(e) => {
                debug!(error = %e, "Showing rejected move as a notice");
                self.notice = Some(e.to_string());
            }
        }
    }

    fn after_move(&mut self) {
        if let Some(outcome) = self.view.outcome() {
            self.record(GameOutcome::from(*outcome));
        }
    }

    fn new_match(&mut self) {
        self.view = self.game.reset();
        self.pending = None;
        self.notice = None;
    }

    #[instrument(skip(self))]
    fn record(&mut self, outcome: GameOutcome) {
        self.session.record(outcome);
        let total = self.stats.record(&self.profile, outcome);
        info!(
            profile = %self.profile,
            wins = total.wins(),
            losses = total.losses(),
            draws = total.draws(),
            "Result recorded"
        );

        if let Err(e) = self.stats.save() {
            warn!(error = %e, "Failed to save statistics");
            self.notice = Some("Could not save statistics".to_string());
        }
    }
}
