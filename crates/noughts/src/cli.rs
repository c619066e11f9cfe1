//! Command-line interface for noughts.

use crate::config::NoughtsConfig;
use clap::{Args, Parser, Subcommand};
use noughts_core::Difficulty;
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a computer opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play tic-tac-toe against an Easy, Medium, or Hard computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (noughts.toml is used when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play(PlayArgs),

    /// Show recorded statistics
    Stats {
        /// Profile to show (all profiles if omitted)
        #[arg(long)]
        profile: Option<String>,

        /// Statistics file
        #[arg(long)]
        stats_path: Option<PathBuf>,
    },

    /// Play matches between a random human and the opponent, headless
    Simulate {
        /// Number of matches
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Opponent tier
        #[arg(short, long, default_value = "hard")]
        difficulty: Difficulty,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

/// Flags for the `play` command. Each overrides the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct PlayArgs {
    /// Opponent tier: easy, medium, or hard
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Pause before the opponent replies, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Profile whose statistics are recorded
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Statistics file
    #[arg(long)]
    pub stats_path: Option<PathBuf>,

    /// Seed the opponent for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,
}

impl PlayArgs {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, mut config: NoughtsConfig) -> NoughtsConfig {
        if let Some(difficulty) = self.difficulty {
            config = config.with_difficulty(difficulty);
        }
        if let Some(delay_ms) = self.delay_ms {
            config = config.with_opponent_delay_ms(delay_ms);
        }
        if let Some(profile) = &self.profile {
            config = config.with_profile(profile.clone());
        }
        if let Some(stats_path) = &self.stats_path {
            config = config.with_stats_path(stats_path.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["noughts"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_explicit_config_path() {
        let cli = Cli::try_parse_from(["noughts", "stats", "--config", "other.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
    }

    #[test]
    fn test_play_flags_override_config() {
        let cli = Cli::try_parse_from([
            "noughts", "play", "--difficulty", "easy", "--delay-ms", "0", "--profile", "ada",
        ])
        .unwrap();
        let Some(Command::Play(args)) = cli.command else {
            panic!("expected play");
        };

        let config = args.apply(NoughtsConfig::default());
        assert_eq!(*config.difficulty(), Difficulty::Easy);
        assert_eq!(*config.opponent_delay_ms(), 0);
        assert_eq!(config.profile(), "ada");
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::try_parse_from(["noughts", "simulate", "-g", "10"]).unwrap();
        match cli.command {
            Some(Command::Simulate { games, difficulty, seed }) => {
                assert_eq!(games, 10);
                assert_eq!(difficulty, Difficulty::Hard);
                assert_eq!(seed, 42);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["noughts", "play", "--difficulty", "brutal"]).is_err());
    }
}
