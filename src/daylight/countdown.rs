//! Countdown text for the remaining daylight.

use chrono::Duration;

use super::duration::{Hms, decompose};

/// Render a duration as `HH:MM:SS`.
///
/// Each field is padded to two digits. Hours keep growing past 99 instead of
/// being cut. Negative fields print as `00`.
pub fn format_countdown(duration: Duration) -> String {
    format_hms(decompose(duration))
}

/// Render already-decomposed fields as `HH:MM:SS`, flooring each at zero.
pub fn format_hms(hms: Hms) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        hms.hours.max(0),
        hms.minutes.max(0),
        hms.seconds.max(0)
    )
}
