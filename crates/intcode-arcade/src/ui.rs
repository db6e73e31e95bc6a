//! UI rendering for the arcade.

use intcode::arcade::{Screen, Tile};
use intcode::grid::Point;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app::{App, Phase};

/// Render the entire UI: status line, playfield, key help.
pub fn render(frame: &mut Frame, app: &App) {
    let [header_area, game_area, menu_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);
    render_screen(frame, app.cabinet.screen(), game_area);
    render_menu(frame, app, menu_area);
}

/// Render the status line (score, blocks left, game state).
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let screen = app.cabinet.screen();
    let state = match app.phase {
        Phase::Playing if app.autopilot => Span::styled("AUTO", Style::default().fg(Color::Yellow)),
        Phase::Playing => Span::styled("PLAY", Style::default().fg(Color::Green)),
        Phase::GameOver => Span::styled("GAME OVER", Style::default().fg(Color::Cyan)),
        Phase::Broken => Span::styled("FAULT", Style::default().fg(Color::Red)),
    };

    let mut spans = vec![
        Span::styled(
            format!("SCORE {:>8}", screen.score()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("BLOCKS {:>4}", screen.block_count()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        state,
    ];
    if let Some(error) = &app.last_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the playfield.
fn render_screen(frame: &mut Frame, screen: &Screen, area: Rect) {
    let Some((min, max)) = screen.bounds() else {
        return;
    };
    let mut lines = Vec::new();
    for y in min.y..=max.y {
        let mut spans = Vec::new();
        for x in min.x..=max.x {
            spans.push(tile_span(screen.tile_at(Point::new(x, y))));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn tile_span(tile: Tile) -> Span<'static> {
    match tile {
        Tile::Empty => Span::raw(" "),
        Tile::Wall => Span::styled("#", Style::default().fg(Color::DarkGray)),
        Tile::Block => Span::styled("=", Style::default().fg(Color::Blue)),
        Tile::Paddle => Span::styled("-", Style::default().fg(Color::White)),
        Tile::Ball => Span::styled("o", Style::default().fg(Color::Yellow)),
    }
}

/// Render the key help line.
fn render_menu(frame: &mut Frame, app: &App, area: Rect) {
    let autopilot = if app.autopilot { "a:manual" } else { "a:auto" };
    let help = format!("←/→ steer   {}   q:quit", autopilot);
    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        area,
    );
}
