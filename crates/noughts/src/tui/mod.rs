//! Terminal UI: a human at the keyboard against the computer opponent.

mod app;
mod input;
mod ui;

pub use app::{App, Flow};
pub use input::{digit_square, move_cursor};

use crate::config::NoughtsConfig;
use crate::stats::StatsStore;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noughts_core::RandomSource;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// How often the key reader checks whether the UI has shut down.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the TUI until the user quits.
#[instrument(skip_all, fields(profile = %config.profile(), difficulty = %config.difficulty()))]
pub async fn run_tui<R: RandomSource>(config: &NoughtsConfig, rng: R) -> Result<()> {
    let stats = StatsStore::load(config.stats_path()).context("Failed to open statistics")?;
    let app = App::new(
        *config.difficulty(),
        config.opponent_delay(),
        config.profile().clone(),
        stats,
        rng,
    );

    info!("Starting Noughts TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let reader = spawn_event_reader(event_tx);

    let res = run_app(&mut terminal, app, &mut event_rx).await;

    // Closing the channel stops the reader before the terminal is restored.
    drop(event_rx);
    if let Err(e) = reader.await {
        warn!(error = %e, "Event reader task failed");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn run_app<R: RandomSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<R>,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else {
                    anyhow::bail!("Terminal input closed");
                };
                if let Event::Key(key) = event {
                    if app.handle_key(key.code, Instant::now()) == Flow::Quit {
                        return Ok(());
                    }
                }
            }
            _ = opponent_due(app.opponent_deadline()) => app.tick(Instant::now()),
        }
    }
}

/// Completes at `deadline`, or never when no opponent reply is pending.
async fn opponent_due(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// Forwards key presses and resizes until the receiver is dropped.
fn spawn_event_reader(tx: mpsc::UnboundedSender<Event>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!(error = %e, "Failed to poll terminal events");
                    break;
                }
            }

            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "Failed to read terminal event");
                    break;
                }
            };

            let forward = match &event {
                Event::Key(key) => key.kind == KeyEventKind::Press,
                Event::Resize(..) => true,
                _ => false,
            };
            if forward && tx.send(event).is_err() {
                break;
            }
        }
        debug!("Event reader stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_opponent_due_fires_at_deadline() {
        let deadline = Instant::now() + Duration::from_millis(20);
        tokio::time::timeout(Duration::from_secs(2), opponent_due(Some(deadline)))
            .await
            .unwrap();
        assert!(Instant::now() >= deadline);
    }

    #[tokio::test]
    async fn test_opponent_due_waits_forever_without_deadline() {
        let waited = tokio::time::timeout(Duration::from_millis(50), opponent_due(None)).await;
        assert!(waited.is_err());
    }
}
