//! Win/loss/draw bookkeeping for the session and per profile.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use noughts_core::{HUMAN, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Match result from the human's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// Human won.
    Win,
    /// Opponent won.
    Loss,
    /// Draw.
    Draw,
}

impl From<Outcome> for GameOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(mark) if mark == HUMAN => Self::Win,
            Outcome::Winner(_) => Self::Loss,
            Outcome::Draw => Self::Draw,
        }
    }
}

/// Wins, losses, and draws for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Scoreboard {
    wins: u32,
    losses: u32,
    draws: u32,
}

impl Scoreboard {
    /// Counts one finished match.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    /// Total matches counted.
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Win rate as a percentage (0.0-100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total() as f64) * 100.0
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StatsFile {
    #[serde(default)]
    profiles: BTreeMap<String, Scoreboard>,
}

/// Per-profile statistics persisted as JSON.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    file: StatsFile,
}

impl StatsStore {
    /// Opens the store at `path`. A missing file starts empty.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref().to_path_buf();
        let file = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| StatsError::new(format!("Failed to read stats file: {}", e)))?;
            serde_json::from_str(&content)
                .map_err(|e| StatsError::new(format!("Failed to parse stats file: {}", e)))?
        } else {
            debug!("Stats file not found, starting empty");
            StatsFile::default()
        };

        info!(profiles = file.profiles.len(), "Stats loaded");
        Ok(Self { path, file })
    }

    /// Where the store is written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Statistics for a profile (zeroes if unknown).
    pub fn get(&self, profile: &str) -> Scoreboard {
        self.file.profiles.get(profile).copied().unwrap_or_default()
    }

    /// Profiles with recorded statistics, sorted by name.
    pub fn profiles(&self) -> impl Iterator<Item = (&str, &Scoreboard)> {
        self.file.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Counts a match for `profile` in memory. Call [`StatsStore::save`] to persist.
    #[instrument(skip(self))]
    pub fn record(&mut self, profile: &str, outcome: GameOutcome) -> Scoreboard {
        let entry = self.file.profiles.entry(profile.to_string()).or_default();
        entry.record(outcome);
        *entry
    }

    /// Writes the store to disk, creating parent directories.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), StatsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StatsError::new(format!("Failed to create stats directory: {}", e)))?;
        }
        let content = serde_json::to_string_pretty(&self.file)
            .map_err(|e| StatsError::new(format!("Failed to encode stats: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StatsError::new(format!("Failed to write stats file: {}", e)))?;
        debug!("Stats saved");
        Ok(())
    }
}

/// Statistics persistence error.
#[derive(Debug, Clone, Display, Error)]
#[display("Stats error: {} at {}:{}", message, file, line)]
pub struct StatsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StatsError {
    /// Creates a new stats error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::Mark;

    #[test]
    fn test_outcome_from_human_perspective() {
        assert_eq!(GameOutcome::from(Outcome::Winner(Mark::X)), GameOutcome::Win);
        assert_eq!(GameOutcome::from(Outcome::Winner(Mark::O)), GameOutcome::Loss);
        assert_eq!(GameOutcome::from(Outcome::Draw), GameOutcome::Draw);
    }

    #[test]
    fn test_scoreboard_counts() {
        let mut board = Scoreboard::default();
        board.record(GameOutcome::Win);
        board.record(GameOutcome::Draw);
        board.record(GameOutcome::Draw);
        board.record(GameOutcome::Loss);
        assert_eq!(board, Scoreboard::new(1, 1, 2));
        assert_eq!(board.total(), 4);
        assert!((board.win_rate() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_scoreboard_win_rate() {
        assert_eq!(Scoreboard::default().win_rate(), 0.0);
    }
}
