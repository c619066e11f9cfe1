//! Noughts - play tic-tac-toe in the terminal.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use noughts::logging::{init_file_tracing, init_stderr_tracing};
use noughts::{Cli, Command, NoughtsConfig, PlayArgs, StatsStore, report, run_tui, simulate};
use noughts_core::{Difficulty, RngSource};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        None => run_play(config_path, PlayArgs::default()).await,
        Some(Command::Play(args)) => run_play(config_path, args).await,
        Some(Command::Stats {
            profile,
            stats_path,
        }) => run_stats(config_path, profile, stats_path),
        Some(Command::Simulate {
            games,
            difficulty,
            seed,
        }) => run_simulate(games, difficulty, seed),
    }
}

/// Run the interactive terminal UI
async fn run_play(config_path: Option<&Path>, args: PlayArgs) -> Result<()> {
    // Tracing starts once `log_path` is known.
    let config = args.apply(NoughtsConfig::load(config_path)?);
    config.validate()?;

    init_file_tracing(config.log_path())?;
    info!(
        config_path = ?config_path,
        difficulty = %config.difficulty(),
        opponent_delay_ms = config.opponent_delay_ms(),
        profile = %config.profile(),
        stats_path = %config.stats_path().display(),
        seed = ?args.seed,
        "Starting play session"
    );

    match args.seed {
        Some(seed) => run_tui(&config, RngSource::seeded(seed)).await,
        None => run_tui(&config, RngSource::from_entropy()).await,
    }
}

/// Print recorded statistics
#[instrument]
fn run_stats(
    config_path: Option<&Path>,
    profile: Option<String>,
    stats_path: Option<PathBuf>,
) -> Result<()> {
    init_stderr_tracing();

    let config = NoughtsConfig::load(config_path)?;
    let path = stats_path.unwrap_or_else(|| config.stats_path().clone());
    let store = StatsStore::load(&path)
        .with_context(|| format!("Failed to load statistics from {}", path.display()))?;

    let rows: Vec<_> = match &profile {
        Some(name) => vec![(name.as_str(), store.get(name))],
        None => store.profiles().map(|(name, s)| (name, *s)).collect(),
    };

    if rows.is_empty() {
        println!("No games recorded in {}", path.display());
        return Ok(());
    }

    println!(
        "{:<16} {:>5} {:>6} {:>5} {:>9}",
        "Profile", "Wins", "Losses", "Draws", "Win rate"
    );
    for (name, score) in rows {
        println!(
            "{:<16} {:>5} {:>6} {:>5} {:>8.1}%",
            name,
            score.wins(),
            score.losses(),
            score.draws(),
            score.win_rate()
        );
    }
    Ok(())
}

/// Play headless matches and print the tally
#[instrument]
fn run_simulate(games: u32, difficulty: Difficulty, seed: u64) -> Result<()> {
    init_stderr_tracing();

    let mut rng = RngSource::seeded(seed);
    let tally = simulate(games, difficulty, &mut rng)?;
    println!("{}", report(difficulty, &tally));
    Ok(())
}
