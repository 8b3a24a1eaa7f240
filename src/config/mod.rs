//! Configuration system for daywatch with validation and geo coordinate integration.
//!
//! This module handles the TOML configuration file, its validation, default value
//! generation, and the private `geo.toml` coordinate override.
//!
//! ## Configuration Sources
//!
//! 1. **--config DIR**: `DIR/daywatch.toml` when a custom directory is given
//! 2. **XDG_CONFIG_HOME**/daywatch/daywatch.toml otherwise
//! 3. A commented default file is created when neither exists
//!
//! A `geo.toml` next to the main file overrides `latitude` and `longitude`, so the
//! main file can be shared or version controlled without revealing a location.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Location]
//! latitude = 52.520000     # Geographic latitude (-90 to 90)
//! longitude = 13.405000    # Geographic longitude (-180 to 180)
//!
//! #[Display]
//! tick_interval = 100      # Refresh cadence in milliseconds (10-10000)
//! bar_width = 30           # Progress bar width in cells (10-200)
//! bar_fill = "remaining"   # Fill the bar with "remaining" or "elapsed" daylight
//! show_tagline = true      # Print the tagline under the version header
//! ```
//!
//! A missing coordinate is not an error: daywatch shows an awaiting-location
//! state until one is configured.

pub mod builder;
pub mod loading;
pub mod validation;
pub mod watcher;

use anyhow::Result;
use serde::Deserialize;

use crate::common::constants::*;
use crate::geo::Coordinate;

// Re-export public API
pub use builder::{create_default_config, update_coordinates};
pub use loading::{get_config_path, load, load_from_path, set_config_dir};
pub use watcher::{ConfigWatcher, LocationUpdate};

#[cfg(test)]
mod tests;

/// Geographic configuration stored separately in `geo.toml`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct GeoConfig {
    /// Geographic latitude in degrees (-90 to +90)
    pub(crate) latitude: Option<f64>,
    /// Geographic longitude in degrees (-180 to +180)
    pub(crate) longitude: Option<f64>,
}

/// What the progress bar fills with.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BarFill {
    /// Daylight still ahead; the bar drains toward sunset.
    #[default]
    Remaining,
    /// Daylight already spent; the bar fills toward sunset.
    Elapsed,
}

impl BarFill {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarFill::Remaining => "remaining",
            BarFill::Elapsed => "elapsed",
        }
    }
}

/// Configuration structure for daywatch settings.
///
/// Every field is optional in the file. After loading, defaults are filled in
/// so the accessors below never need to guess.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Milliseconds between ticks
    pub tick_interval: Option<u64>,
    /// Progress bar width in terminal cells
    pub bar_width: Option<u16>,
    pub bar_fill: Option<BarFill>,
    pub show_tagline: Option<bool>,
}

impl Config {
    /// Load configuration using automatic path detection.
    pub fn load() -> Result<Self> {
        load()
    }

    /// The configured coordinate, if both halves are present.
    ///
    /// Values are range-checked during loading, so an invalid pair only shows up
    /// here for hand-built configs; it is treated as absent.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).ok(),
            _ => None,
        }
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL))
    }

    pub fn bar_width(&self) -> u16 {
        self.bar_width.unwrap_or(DEFAULT_BAR_WIDTH)
    }

    pub fn bar_fill(&self) -> BarFill {
        self.bar_fill.unwrap_or_default()
    }

    pub fn show_tagline(&self) -> bool {
        self.show_tagline.unwrap_or(DEFAULT_SHOW_TAGLINE)
    }

    /// Fill in defaults for every unset display field.
    pub fn apply_defaults(&mut self) {
        self.tick_interval.get_or_insert(DEFAULT_TICK_INTERVAL);
        self.bar_width.get_or_insert(DEFAULT_BAR_WIDTH);
        self.bar_fill.get_or_insert(BarFill::default());
        self.show_tagline.get_or_insert(DEFAULT_SHOW_TAGLINE);
    }

    /// Print the effective configuration in the block layout.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        match self.coordinate() {
            Some(coordinate) => log_indented!("Location: {coordinate}"),
            None => log_indented!("Location: not configured"),
        }
        log_indented!("Tick interval: {}ms", self.tick_interval().as_millis());
        log_indented!(
            "Progress bar: {} cells, {} daylight",
            self.bar_width(),
            self.bar_fill().as_str()
        );
    }
}
