//! Rendering surfaces for daylight readings.
//!
//! The scheduler hands every [`DaylightReading`] to a [`Renderer`]. Two are
//! provided: [`TerminalRenderer`] redraws one status line in place, and
//! [`LogRenderer`] writes a log line whenever something visible changes, which
//! suits pipes, service logs and simulations.

pub mod report;
pub mod terminal;

use anyhow::Result;
use chrono::Local;

use crate::config::BarFill;
use crate::daylight::{DaylightReading, DaylightSnapshot};

pub use report::{ReadingReport, ReportStatus};
pub use terminal::TerminalRenderer;

/// Something that shows readings to the user.
pub trait Renderer {
    /// Show the reading produced by the latest tick.
    fn render(&mut self, reading: &DaylightReading) -> Result<()>;

    /// Called once after the last tick.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Layout options shared by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub bar_width: u16,
    pub bar_fill: BarFill,
}

impl DisplayOptions {
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            bar_width: config.bar_width(),
            bar_fill: config.bar_fill(),
        }
    }
}

/// Draw a bar `width` cells wide with `percent` of it filled.
pub fn progress_bar(percent: f64, width: u16) -> String {
    let width = usize::from(width);
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// The single line shown for a reading.
pub fn status_line(reading: &DaylightReading, options: DisplayOptions) -> String {
    let snapshot = match reading {
        DaylightReading::AwaitingLocation => {
            return format!(
                "… {} awaiting location",
                progress_bar(0.0, options.bar_width)
            );
        }
        DaylightReading::Daylight(snapshot) => snapshot,
    };

    // Polar day and polar night look the same here, so show neither sun nor moon
    if snapshot.window.is_degenerate() {
        return "◌ the sun does not cross the horizon today".to_string();
    }

    let (percent, label) = match options.bar_fill {
        BarFill::Remaining => (snapshot.progress.remaining_percentage(), "left"),
        BarFill::Elapsed => (snapshot.progress.percentage, "spent"),
    };
    let icon = if snapshot.is_daylight() { '☀' } else { '☾' };

    format!(
        "{icon} {} {percent:5.1}% {label}  {} to sunset",
        progress_bar(percent, options.bar_width),
        snapshot.countdown
    )
}

/// Log the solar window behind a snapshot, in host-local time.
pub fn log_solar_window(snapshot: &DaylightSnapshot) {
    log_pipe!();
    log_debug!("Solar window for {}:", snapshot.coordinate);
    log_indented!(
        "Sunrise: {}",
        snapshot.window.sunrise.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    );
    log_indented!(
        " Sunset: {}",
        snapshot.window.sunset.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    );
    let daylight = crate::daylight::format_countdown(snapshot.window.daylight());
    log_indented!("Daylight: {daylight}");
}

/// Renderer that logs a line when the state or the whole percentage changes.
pub struct LogRenderer {
    options: DisplayOptions,
    debug_enabled: bool,
    last_key: Option<RenderKey>,
    last_window: Option<crate::daylight::SolarWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderKey {
    Awaiting,
    Daylight { whole_percent: i64, sun_up: bool },
}

impl LogRenderer {
    pub fn new(options: DisplayOptions, debug_enabled: bool) -> Self {
        Self {
            options,
            debug_enabled,
            last_key: None,
            last_window: None,
        }
    }

    fn key(reading: &DaylightReading) -> RenderKey {
        match reading {
            DaylightReading::AwaitingLocation => RenderKey::Awaiting,
            DaylightReading::Daylight(snapshot) => RenderKey::Daylight {
                whole_percent: snapshot.progress.percentage.floor() as i64,
                sun_up: snapshot.is_daylight(),
            },
        }
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, reading: &DaylightReading) -> Result<()> {
        if self.debug_enabled
            && let Some(snapshot) = reading.snapshot()
            && self.last_window != Some(snapshot.window)
        {
            self.last_window = Some(snapshot.window);
            log_solar_window(snapshot);
        }

        let key = Self::key(reading);
        if self.last_key != Some(key) {
            self.last_key = Some(key);
            log_decorated!("{}", status_line(reading, self.options));
        }
        Ok(())
    }
}
