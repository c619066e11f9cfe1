//! Stateless UI rendering for the match.

use super::app::App;
use noughts_core::{Mark, MatchView, Position, RandomSource, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Draws the whole screen.
pub fn draw<R: RandomSource>(frame: &mut Frame, app: &App<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Board and scores
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Noughts - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(42), Constraint::Length(28)])
        .split(chunks[1]);

    draw_board(frame, middle[0], app.view(), app.cursor());
    draw_scores(frame, middle[1], app);

    let status = match app.notice() {
        Some(notice) => format!("{} ({})", app.status_line(), notice),
        None => app.status_line().to_string(),
    };
    let status_style = if app.view().is_terminal() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(status)
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("Arrows+Enter or 1-9: move | N: New game | D: Difficulty | Q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, view: &MatchView, cursor: Position) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], view, cursor, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, view: &MatchView, cursor: Position, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        draw_cell(frame, cols[col * 2], view, cursor, row * 3 + col);
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, view: &MatchView, cursor: Position, index: usize) {
    let key = (index + 1).to_string();
    let (symbol, base_style) = match view.cells()[index] {
        Square::Empty => (key.as_str(), Style::default().fg(Color::DarkGray)),
        Square::Occupied(Mark::X) => (
            "X",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Mark::O) => (
            "O",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let mut style = base_style;
    if view.is_winning_cell(index) {
        style = style.bg(Color::Green).fg(Color::Black);
    }
    if view.last_move().is_some_and(|mv| mv.position.to_index() == index) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if cursor.to_index() == index && !view.is_terminal() {
        style = style.bg(Color::White).fg(Color::Black);
    }

    // Vertically center the symbol in the three-line cell.
    let text = vec![
        Line::default(),
        Line::from(Span::styled(format!(" {} ", symbol), style)),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_scores<R: RandomSource>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let session = app.session();
    let record = app.profile_record();
    let label = Style::default().fg(Color::Gray);

    let lines = vec![
        Line::from(vec![
            Span::styled("Difficulty: ", label),
            Span::styled(
                app.difficulty().label(),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled("This session", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("  You (X):      {}", session.wins())),
        Line::from(format!("  Draws:        {}", session.draws())),
        Line::from(format!("  Computer (O): {}", session.losses())),
        Line::default(),
        Line::from(Span::styled(
            format!("Profile {}", app.profile()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "  {}W {}L {}D",
            record.wins(),
            record.losses(),
            record.draws()
        )),
        Line::from(format!("  Win rate: {:.1}%", record.win_rate())),
    ];

    let scores = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(scores, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatsStore;
    use noughts_core::{Difficulty, ScriptedRandom};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draws_status_and_scores() {
        let dir = tempfile::tempdir().unwrap();
        let stats = StatsStore::load(dir.path().join("stats.json")).unwrap();
        let app = App::new(
            Difficulty::Hard,
            Duration::ZERO,
            "ada".to_string(),
            stats,
            ScriptedRandom::new([0]),
        );

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Your Turn (X)"));
        assert!(text.contains("Difficulty: Hard"));
        assert!(text.contains("Profile ada"));
    }
}
