//! Structured logging system with visual formatting.
//!
//! This module provides the box-drawing console output used throughout daywatch.
//! All macros funnel into [`emit`], which applies the line layout, the optional
//! simulated-time prefix and the runtime enable switch.
//!
//! ## Logging Conventions
//!
//! - **`log_block_start!`**: starts a new conceptual block; prints an empty
//!   `┃` spacer followed by `┣ message`.
//! - **`log_decorated!`**: a line inside the current block, `┣ message`.
//! - **`log_indented!`**: nested detail, `┃   message`.
//! - **`log_pipe!`**: a bare `┃` spacer, used before levelled messages.
//! - **`log_version!`** / **`log_end!`**: the `┏ daywatch vX.Y.Z ━━╸` header
//!   and the closing `╹`.
//! - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`,
//!   `log_critical!`**: `┣[LEVEL] message` with a coloured level tag.
//! - **`log_error_exit!`**: `┗[ERROR] message`, closing the output on failure.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Cursor row held by the in-place status line on stdout.
pub static STATUS_LINE: StatusLine = StatusLine::new();

/// Whether an unterminated status line sits on the cursor row.
///
/// Log entries written while it is open start on a fresh line, and the
/// owner of the row redraws it once it has been taken.
pub struct StatusLine(AtomicBool);

impl StatusLine {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn open(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Release the row, returning whether it was held.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Line layouts understood by [`emit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Decorated,
    Indented,
    BlockStart,
    Pipe,
    Version,
    End,
    Level(Level),
    ErrorExit,
}

/// Semantic log levels and their tag colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
    Debug,
    Critical,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "\x1b[32mINFO\x1b[0m",
            Level::Warning => "\x1b[33mWARNING\x1b[0m",
            Level::Error => "\x1b[31mERROR\x1b[0m",
            Level::Debug => "\x1b[32mDEBUG\x1b[0m",
            Level::Critical => "\x1b[31mCRITICAL\x1b[0m",
        }
    }
}

/// Runtime switches for the logger.
pub struct Log;

impl Log {
    /// Enable or disable logging, e.g. for quiet one-shot output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// `[HH:MM:SS] ` of the simulated clock, or nothing on real time.
    ///
    /// Checked without initializing the global time source.
    pub fn get_timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            format!("[{}] ", crate::time_source::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Render one log entry in the given layout.
pub fn render_line(layout: Layout, prefix: &str, message: fmt::Arguments<'_>) -> String {
    match layout {
        Layout::Decorated => format!("{prefix}┣ {message}\n"),
        Layout::Indented => format!("{prefix}┃   {message}\n"),
        Layout::BlockStart => format!("{prefix}┃\n{prefix}┣ {message}\n"),
        Layout::Pipe => format!("{prefix}┃\n"),
        Layout::Version => format!("{prefix}┏ {message} ━━╸\n"),
        Layout::End => format!("{prefix}╹\n"),
        Layout::Level(level) => format!("{prefix}┣[{}] {message}\n", level.tag()),
        Layout::ErrorExit => format!(
            "{prefix}┃\n{prefix}┗[{}] {message}\n",
            Level::Error.tag()
        ),
    }
}

/// Write a log entry to stdout if logging is enabled.
pub fn emit(layout: Layout, message: fmt::Arguments<'_>) {
    if !Log::is_enabled() {
        return;
    }
    let prefix = Log::get_timestamp_prefix();
    let line = render_line(layout, &prefix, message);
    let mut out = std::io::stdout().lock();
    let _ = write_entry(&mut out, &STATUS_LINE, &line);
}

fn write_entry(out: &mut impl Write, status_line: &StatusLine, line: &str) -> std::io::Result<()> {
    if status_line.take() {
        out.write_all(b"\n")?;
    }
    out.write_all(line.as_bytes())?;
    out.flush()
}

// # Logging Macros
//
// Each macro accepts either a format string with arguments or a single
// expression implementing `Display`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_layout {
    ($layout:expr, $fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($layout, format_args!($fmt $($arg)*))
    };
    ($layout:expr, $expr:expr) => {
        $crate::logger::emit($layout, format_args!("{}", $expr))
    };
}

/// Log a decorated message as part of an existing block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!($crate::logger::Layout::Decorated, $($arg)+)
    };
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!($crate::logger::Layout::Indented, $($arg)+)
    };
}

/// Log a block start message, initiating a new conceptual block.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!($crate::logger::Layout::BlockStart, $($arg)+)
    };
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::emit($crate::logger::Layout::Pipe, format_args!(""))
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::emit(
            $crate::logger::Layout::Version,
            format_args!("daywatch v{}", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::emit($crate::logger::Layout::End, format_args!(""))
    };
}

/// Log an informational message with a green tag.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!(
            $crate::logger::Layout::Level($crate::logger::Level::Info),
            $($arg)+
        )
    };
}

/// Log a warning message with a yellow tag.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!(
            $crate::logger::Layout::Level($crate::logger::Level::Warning),
            $($arg)+
        )
    };
}

/// Log an error message with a red tag.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!(
            $crate::logger::Layout::Level($crate::logger::Level::Error),
            $($arg)+
        )
    };
}

/// Log an error that ends the program's output, closing the pipe with `┗`.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!($crate::logger::Layout::ErrorExit, $($arg)+)
    };
}

/// Log a debug message with a green tag.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!(
            $crate::logger::Layout::Level($crate::logger::Level::Debug),
            $($arg)+
        )
    };
}

/// Log a critical message with a red tag.
#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)+) => {
        $crate::__log_with_layout!(
            $crate::logger::Layout::Level($crate::logger::Level::Critical),
            $($arg)+
        )
    };
}
