//! Event loop and input handling.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use intcode::arcade::Joystick;
use ratatui::DefaultTerminal;

use super::app::App;
use super::ui;

/// Frame budget: one joystick reading per frame keeps the ball watchable.
const FRAME: Duration = Duration::from_millis(25);

/// Run the main event loop.
pub fn run_event_loop(app: &mut App) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, app);
    ratatui::restore();
    result
}

fn run_loop(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    while app.running {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release on Windows).
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code);
                }
            }
        }

        app.tick();
    }
    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Left | KeyCode::Char('h') => app.steer(Joystick::Left),
        KeyCode::Right | KeyCode::Char('l') => app.steer(Joystick::Right),
        KeyCode::Down | KeyCode::Char('j') => app.steer(Joystick::Neutral),
        KeyCode::Char('a') => app.toggle_autopilot(),
        _ => {}
    }
}
