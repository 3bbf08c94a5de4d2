//! Keyboard input for the TUI

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Polls the terminal for key presses
pub struct Events {
    tick_rate: Duration,
}

impl Events {
    /// Create an input source that waits at most `tick_rate_ms` per poll
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Returns the next key press, or `None` if the tick elapsed first.
    /// Resize and mouse events are dropped; the next draw picks up the size.
    pub fn next_key(&self) -> Result<Option<KeyEvent>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }

        match event::read()? {
            // Only press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}
