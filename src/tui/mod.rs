//! Terminal viewer for a finished trace.
//!
//! Thin presentation layer: it consumes a complete `Trace` plus the source
//! text, and offers prev/next navigation with a highlighted, scrolled-into-
//! view current line. Holding a navigation key auto-repeats via the
//! terminal's key repeat against the 100ms poll tick.

pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;

use crate::trace::Trace;
use app::App;
use ui::render_ui;

/// Run the viewer until the user quits.
pub fn run_viewer(trace: Trace, source: &str, file_name: &str) -> Result<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!("viewer requires a terminal; use --json instead"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(trace, source, file_name);
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Right | KeyCode::Char('n') | KeyCode::Char(' ') => app.next_step(),
                    KeyCode::Left | KeyCode::Char('p') => app.prev_step(),
                    KeyCode::Home => app.first_step(),
                    KeyCode::End => app.last_step(),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}
