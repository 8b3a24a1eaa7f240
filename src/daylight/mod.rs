//! Daylight progress engine.
//!
//! Everything in this module is pure: given "now" and the day's solar window it
//! produces the share of daylight already spent, the time left until sunset, and
//! the countdown text shown to the user. Nothing here reads the clock, touches
//! the terminal or caches anything between ticks.
//!
//! ## Module Structure
//!
//! - [`duration`]: Signed differences between instants and their `h/m/s` split
//! - [`progress`]: Percentage of the daylight window elapsed, with clamping
//! - [`countdown`]: `HH:MM:SS` rendering of the remaining time
//! - [`reading`]: One tick of the pipeline, including the awaiting-location state

pub mod countdown;
pub mod duration;
pub mod progress;
pub mod reading;

use chrono::{DateTime, Utc};

pub use countdown::format_countdown;
pub use duration::{Hms, decompose, diff_between};
pub use progress::{ProgressResult, SolarWindow, compute_progress};
pub use reading::{DaylightReading, DaylightSnapshot, evaluate};

/// An absolute point in time as seen by the engine.
pub type Instant = DateTime<Utc>;
