//! In-place status line for interactive terminals.

use anyhow::Result;
use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;

use super::{DisplayOptions, Renderer, status_line};
use crate::daylight::DaylightReading;
use crate::logger::{STATUS_LINE, StatusLine};

/// Redraws a single line on every tick where its text changed.
pub struct TerminalRenderer<W: Write> {
    out: W,
    options: DisplayOptions,
    last_line: Option<String>,
    /// Shared with the logger when both write to the same stream
    status_line: Option<&'static StatusLine>,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout(options: DisplayOptions) -> Self {
        let mut renderer = Self::new(std::io::stdout(), options);
        renderer.status_line = Some(&STATUS_LINE);
        renderer
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, options: DisplayOptions) -> Self {
        Self {
            out,
            options,
            last_line: None,
            status_line: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, reading: &DaylightReading) -> Result<()> {
        let line = status_line(reading, self.options);
        // A log entry may have pushed the line up, so redraw it even if unchanged
        let row_held = self.status_line.is_none_or(StatusLine::is_open);
        if row_held && self.last_line.as_deref() == Some(line.as_str()) {
            return Ok(());
        }

        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(&line)
        )?;
        self.out.flush()?;
        self.last_line = Some(line);
        if let Some(tracker) = self.status_line {
            tracker.open();
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let row_held = self.status_line.is_none_or(StatusLine::take);
        if self.last_line.is_some() && row_held {
            writeln!(self.out)?;
            self.out.flush()?;
        }
        Ok(())
    }
}
