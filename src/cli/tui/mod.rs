//! Interactive TUI for Bookshelf
//!
//! A sidebar menu with the four library pages (view, search, add, delete)
//! drawn with ratatui. All reads and writes go through the same
//! [`Library`] the command-line commands use.

mod app;
mod event;
mod views;

use std::io::{self, stdout, Stdout};
use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;

use super::Output;
use crate::storage::{Config, Library};
use app::{App, Page};
use event::Events;

/// Terminal type alias
pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Launch the TUI
pub fn run(output: &Output, library: Library, config: &Config, page: &str) -> Result<()> {
    output.verbose_ctx("tui", &format!("Opening {} in the TUI", library.location()));

    let page: Page = page.parse().unwrap_or_default();

    // Load before touching the terminal so errors print normally
    let mut app = App::new(library, config.languages.clone(), page)?;

    let mut terminal = init_terminal()?;
    let events = Events::new(250);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, &events)));
    let restore_result = restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}

fn init_terminal() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(ratatui::Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
