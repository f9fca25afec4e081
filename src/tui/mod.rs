//! Live plot view for a single query.
//!
//! One view session owns the terminal from query submission to quit: raw
//! mode and the alternate screen are entered on the way in and restored on
//! every exit path, including a failed fetch.

pub mod app;
pub mod event;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::client::SeriesSource;
use app::App;
use event::{Event, EventHandler};

/// How often the view re-polls the backend.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(15);

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Run one view session for `query`, blocking until the user quits the
/// view or a fetch fails.
pub fn run(source: &dyn SeriesSource, query: &str) -> Result<()> {
    let mut terminal = setup_terminal()?;

    let mut app = App::new(query);
    let events = EventHandler::new(REFRESH_INTERVAL);

    let result = run_app(&mut terminal, &mut app, &events, source);

    // Stop the input thread before the prompt takes stdin back.
    drop(events);

    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("failed to enter raw terminal mode")?;
    let mut stdout = io::stdout();

    // A setup failure past this point must not leave raw mode on.
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }
    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(err) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(err.into())
        }
    }
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main view loop: draw, then react to one event at a time.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &EventHandler,
    source: &dyn SeriesSource,
) -> Result<()> {
    // Initial fetch and draw happen before the first event.
    app.refresh(source)?;

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Events arrive in channel order: a refresh queued before the quit
        // key still gets its final fetch and redraw, and nothing queued
        // after the quit key is consumed.
        match events.next()? {
            Event::Key(key) => {
                if is_quit(key) {
                    app.should_quit = true;
                }
            }
            Event::Refresh => {
                app.refresh(source)?;
            }
            Event::Resize(_, _) => {
                // Redrawn at the top of the loop with the new dimensions.
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// `q`, `Esc`, or Ctrl-C closes the view.
fn is_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys_close_the_view() {
        assert!(is_quit(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert!(!is_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)));
        assert!(!is_quit(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
