//! Sunrise and sunset calculations.
//!
//! The astronomy itself is delegated to the `sunrise` crate. This module only
//! decides which calendar day to ask about and what to hand back when the sun
//! never crosses the horizon.
//!
//! ## Extreme latitudes
//!
//! During polar day or polar night the sunrise equations have no solution and
//! the crate can return instants nowhere near the requested date. Those results
//! are replaced with a zero-length window at approximate solar noon, which the
//! progress calculator reports as 0% with the countdown running to noon.

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use super::Coordinate;
use crate::daylight::{Instant, SolarWindow};

/// Source of sunrise/sunset instants.
///
/// Implementations must always answer; degenerate windows are allowed, errors
/// are not.
#[cfg_attr(test, mockall::automock)]
pub trait SolarEphemeris {
    /// Sunrise and sunset for the calendar day containing `now`.
    fn solar_window(&self, now: Instant, coordinate: Coordinate) -> SolarWindow;
}

/// Ephemeris backed by the `sunrise` crate.
///
/// The calendar day is taken from the host clock's local date for `now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunriseEphemeris;

impl SolarEphemeris for SunriseEphemeris {
    fn solar_window(&self, now: Instant, coordinate: Coordinate) -> SolarWindow {
        let today = now.with_timezone(&Local).date_naive();
        solar_window_for_date(today, coordinate)
    }
}

/// Sunrise and sunset for a specific date.
pub fn solar_window_for_date(date: NaiveDate, coordinate: Coordinate) -> SolarWindow {
    let Some(coords) = Coordinates::new(coordinate.latitude(), coordinate.longitude()) else {
        return polar_fallback(date, coordinate);
    };

    let solar_day = SolarDay::new(coords, date);
    let sunrise = solar_day.event_time(SolarEvent::Sunrise);
    let sunset = solar_day.event_time(SolarEvent::Sunset);

    if is_near_date(sunrise, date) && is_near_date(sunset, date) {
        SolarWindow::new(sunrise, sunset)
    } else {
        polar_fallback(date, coordinate)
    }
}

/// Approximate solar noon for the date at the given longitude.
pub fn approximate_solar_noon(date: NaiveDate, coordinate: Coordinate) -> Instant {
    // 4 minutes of clock time per degree of longitude
    let offset_secs = (coordinate.longitude() * 240.0).round() as i64;
    date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(12) - Duration::seconds(offset_secs)
}

/// Zero-length window used when the sun does not rise or set.
fn polar_fallback(date: NaiveDate, coordinate: Coordinate) -> SolarWindow {
    let noon = approximate_solar_noon(date, coordinate);
    SolarWindow::new(noon, noon)
}

/// Whether an event lands within a day either side of the date (UTC).
fn is_near_date(event: Instant, date: NaiveDate) -> bool {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    event >= midnight - Duration::days(1) && event <= midnight + Duration::days(2)
}
