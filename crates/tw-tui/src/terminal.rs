//! Terminal setup, teardown, and the main event loop.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use crate::app::{App, Focus};
use crate::views;

/// Launch the TUI application.
pub fn run(app: &mut App) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| views::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        let event = event::read().map_err(|e| format!("event error: {e}"))?;
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }
    }
}

/// Handle keyboard input; the karma prompt swallows everything else first.
fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C and Ctrl+Q always quit.
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        app.should_quit = true;
        return;
    }

    // Karma prompt: y rolls with the karma die, n without, Esc aborts.
    if let Some(name) = app.pending_karma.clone() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.finish_roll(&name, true),
            KeyCode::Char('n') | KeyCode::Char('N') => app.finish_roll(&name, false),
            KeyCode::Esc => app.pending_karma = None,
            _ => {}
        }
        return;
    }

    // Global shortcuts.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('k') => app.next_karma_die(),
            KeyCode::Char('r') => app.reload(),
            _ => {}
        }
        return;
    }

    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::Quick => handle_quick_key(app, key),
    }
}

/// Keys while the talent entry has focus.
fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.roll_input(),
        KeyCode::Tab => app.cycle_hit(),
        KeyCode::Backspace => {
            app.input.pop();
            app.refresh_hits();
        }
        KeyCode::Esc => {
            app.input.clear();
            app.refresh_hits();
        }
        KeyCode::Up | KeyCode::Down => {
            if app.quick_len() > 0 {
                app.focus = Focus::Quick;
            }
        }
        KeyCode::Char(c) => {
            app.input.push(c);
            app.refresh_hits();
        }
        _ => {}
    }
}

/// Keys while the quick-access panel has focus.
fn handle_quick_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
            app.quick_move(true);
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
            app.quick_move(false);
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.roll_quick(),
        KeyCode::Tab | KeyCode::Esc | KeyCode::Char('i') | KeyCode::Char('/') => {
            app.focus = Focus::Input;
        }
        _ => {}
    }
}
