//! Application-wide constants and defaults.

// # Application

pub const APP_NAME: &str = "daywatch";
pub const CONFIG_FILE_NAME: &str = "daywatch.toml";
pub const GEO_FILE_NAME: &str = "geo.toml";

pub const TAGLINE: &str = "Your life is finite, spend it in the sunlight.";

pub const EXIT_FAILURE: i32 = 1;

// # Tick cadence (milliseconds)

pub const DEFAULT_TICK_INTERVAL: u64 = 100;
pub const MINIMUM_TICK_INTERVAL: u64 = 10;
pub const MAXIMUM_TICK_INTERVAL: u64 = 10_000;

// # Progress bar

pub const DEFAULT_BAR_WIDTH: u16 = 30;
pub const MINIMUM_BAR_WIDTH: u16 = 10;
pub const MAXIMUM_BAR_WIDTH: u16 = 200;
pub const DEFAULT_SHOW_TAGLINE: bool = true;

// # Config watcher

/// Debounce for file change events, editors often write in several steps
pub const CONFIG_WATCH_DEBOUNCE_MS: u64 = 500;

// # Simulation

/// Default acceleration: one simulated hour per real second
pub const DEFAULT_SIMULATION_MULTIPLIER: f64 = 3600.0;
pub const MINIMUM_SIMULATION_MULTIPLIER: f64 = 0.1;
pub const MAXIMUM_SIMULATION_MULTIPLIER: f64 = 3600.0;
