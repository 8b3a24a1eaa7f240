//! Signed durations between instants and their hour/minute/second split.

use chrono::Duration;

use super::Instant;

/// Whole hours, minutes and seconds of a duration.
///
/// All three fields carry the sign of the source duration, so
/// `|hours| * 3600 + |minutes| * 60 + |seconds|` is the magnitude truncated to
/// whole seconds. Hours do not wrap at 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Hms {
    /// Total number of whole seconds represented, sign included.
    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Signed duration `end - start`. Negative when `end` precedes `start`.
pub fn diff_between(start: Instant, end: Instant) -> Duration {
    end.signed_duration_since(start)
}

/// Split a duration into whole hours, minutes and seconds.
///
/// Sub-second remainders are truncated toward zero.
pub fn decompose(duration: Duration) -> Hms {
    let total = duration.num_seconds();
    Hms {
        hours: total / 3600,
        minutes: (total % 3600) / 60,
        seconds: total % 60,
    }
}
