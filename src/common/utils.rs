//! Small shared helpers: terminal setup and path display.

use anyhow::Result;
use crossterm::{cursor, execute};
use std::io::{IsTerminal, stdout};
use std::path::Path;

/// Hides the cursor for the lifetime of the guard when stdout is a terminal.
///
/// Does nothing when output is piped or redirected, so daywatch can run under
/// a service manager or feed a status bar.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        let active = stdout().is_terminal();
        if active {
            execute!(stdout(), cursor::Hide)?;
        }
        Ok(Self { active })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(stdout(), cursor::Show);
        }
    }
}

/// Display a path with the home directory replaced by `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}
