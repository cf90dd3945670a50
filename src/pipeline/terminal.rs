//! Terminal setup and teardown.
//!
//! Raw mode, alternate screen, hidden cursor and mouse capture on enter;
//! everything restored on exit, and again best-effort on drop so a panic
//! does not leave the terminal unusable.

use std::io::{self, stdout};

use crossterm::cursor;
use crossterm::execute;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

use crate::state::input;

/// Terminal setup/teardown handle.
pub struct TerminalSetup {
    active: bool,
}

impl TerminalSetup {
    pub fn new() -> Self {
        Self { active: false }
    }

    /// Current terminal size (columns, rows).
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Enter fullscreen: raw mode, alternate screen, hidden cursor, mouse
    /// capture.
    pub fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        input::enable_mouse()?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call twice.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        input::disable_mouse()?;
        execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Default for TerminalSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalSetup {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
