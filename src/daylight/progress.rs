//! Daylight progress calculation.
//!
//! This is the only place where out-of-window times get clamped. Callers can
//! rely on a [`ProgressResult`] always holding a percentage in `[0, 100]` and a
//! non-negative remaining duration, whatever the ephemeris handed us.

use chrono::Duration;

use super::Instant;
use super::duration::diff_between;

/// Sunrise and sunset for one calendar day at one location.
///
/// `sunset >= sunrise` is what a well-behaved ephemeris returns, but polar
/// days and nights may yield an empty or inverted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarWindow {
    pub sunrise: Instant,
    pub sunset: Instant,
}

impl SolarWindow {
    pub fn new(sunrise: Instant, sunset: Instant) -> Self {
        Self { sunrise, sunset }
    }

    /// Length of the daylight window. Zero or negative for degenerate windows.
    pub fn daylight(&self) -> Duration {
        diff_between(self.sunrise, self.sunset)
    }

    /// Whether the window has no usable daylight span.
    pub fn is_degenerate(&self) -> bool {
        self.daylight() <= Duration::zero()
    }
}

/// Share of today's daylight already spent, and time left until sunset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressResult {
    /// Percentage of the daylight window elapsed, in `[0, 100]`.
    pub percentage: f64,
    /// Time left until sunset, never negative.
    pub remaining: Duration,
}

impl ProgressResult {
    /// Percentage of the daylight window still ahead.
    pub fn remaining_percentage(&self) -> f64 {
        100.0 - self.percentage
    }
}

/// Compute how far through its daylight window `now` is.
///
/// Before sunrise the percentage is 0 and the remaining time is the whole
/// distance to sunset. After sunset the percentage is 100 and nothing remains.
/// A window with no positive length reports 0%.
pub fn compute_progress(now: Instant, window: &SolarWindow) -> ProgressResult {
    let total = window.daylight();
    let remaining = diff_between(now, window.sunset).max(Duration::zero());

    let total_ms = total.num_milliseconds();
    let percentage = if total_ms <= 0 {
        0.0
    } else {
        let elapsed = diff_between(window.sunrise, now).clamp(Duration::zero(), total);
        (100.0 * elapsed.num_milliseconds() as f64 / total_ms as f64).clamp(0.0, 100.0)
    };

    ProgressResult {
        percentage,
        remaining,
    }
}
