//! Noughts - terminal front end for the tic-tac-toe core.
//!
//! Wires [`noughts_core`] to a keyboard, a screen, and a statistics file:
//!
//! - **config**: TOML settings overridden by command-line flags
//! - **stats**: session scoreboard and per-profile results on disk
//! - **simulate**: headless matches for comparing opponent tiers
//! - **tui**: the ratatui board and its event loop

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod logging;
pub mod simulate;
pub mod stats;
pub mod tui;

pub use cli::{Cli, Command, PlayArgs};
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, NoughtsConfig};
pub use simulate::{report, simulate};
pub use stats::{GameOutcome, Scoreboard, StatsError, StatsStore};
pub use tui::run_tui;
