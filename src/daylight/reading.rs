//! One tick of the daylight pipeline.

use chrono::Duration;

use super::countdown::format_countdown;
use super::progress::{ProgressResult, SolarWindow, compute_progress};
use super::Instant;
use crate::geo::Coordinate;
use crate::geo::solar::SolarEphemeris;

/// What a single tick produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DaylightReading {
    /// No coordinate is known yet, so nothing was computed.
    AwaitingLocation,
    /// A full evaluation for the current instant.
    Daylight(DaylightSnapshot),
}

/// Everything a rendering surface needs for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DaylightSnapshot {
    pub now: Instant,
    pub coordinate: Coordinate,
    pub window: SolarWindow,
    pub progress: ProgressResult,
    /// `HH:MM:SS` until sunset.
    pub countdown: String,
}

impl DaylightSnapshot {
    pub fn percentage(&self) -> f64 {
        self.progress.percentage
    }

    pub fn remaining(&self) -> Duration {
        self.progress.remaining
    }

    /// Whether the sun is currently up according to today's window.
    pub fn is_daylight(&self) -> bool {
        !self.window.is_degenerate()
            && self.now >= self.window.sunrise
            && self.now < self.window.sunset
    }
}

impl DaylightReading {
    pub fn snapshot(&self) -> Option<&DaylightSnapshot> {
        match self {
            DaylightReading::AwaitingLocation => None,
            DaylightReading::Daylight(snapshot) => Some(snapshot),
        }
    }
}

/// Run the pipeline for `now`.
///
/// The solar window is looked up fresh on every call. Without a coordinate the
/// ephemeris is not consulted at all.
pub fn evaluate<E>(now: Instant, coordinate: Option<Coordinate>, ephemeris: &E) -> DaylightReading
where
    E: SolarEphemeris + ?Sized,
{
    let Some(coordinate) = coordinate else {
        return DaylightReading::AwaitingLocation;
    };

    let window = ephemeris.solar_window(now, coordinate);
    let progress = compute_progress(now, &window);
    let countdown = format_countdown(progress.remaining);

    DaylightReading::Daylight(DaylightSnapshot {
        now,
        coordinate,
        window,
        progress,
        countdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::solar::MockSolarEphemeris;
    use chrono::{TimeZone, Utc};

    fn at(h: u32, m: u32, s: u32) -> Instant {
        Utc.with_ymd_and_hms(2024, 6, 21, h, m, s).unwrap()
    }

    fn berlin() -> Coordinate {
        Coordinate::new(52.52, 13.405).unwrap()
    }

    #[test]
    fn test_missing_coordinate_skips_ephemeris() {
        let mut ephemeris = MockSolarEphemeris::new();
        ephemeris.expect_solar_window().times(0);

        let reading = evaluate(at(12, 0, 0), None, &ephemeris);
        assert_eq!(reading, DaylightReading::AwaitingLocation);
        assert!(reading.snapshot().is_none());
    }

    #[test]
    fn test_full_pipeline() {
        let window = SolarWindow::new(at(6, 0, 0), at(20, 0, 0));
        let mut ephemeris = MockSolarEphemeris::new();
        ephemeris
            .expect_solar_window()
            .withf(|now, coordinate| *now == at(13, 0, 0) && coordinate.latitude() == 52.52)
            .times(1)
            .returning(move |_, _| window);

        let reading = evaluate(at(13, 0, 0), Some(berlin()), &ephemeris);
        let snapshot = reading.snapshot().expect("should have a snapshot");

        assert_eq!(snapshot.percentage(), 50.0);
        assert_eq!(snapshot.remaining(), Duration::hours(7));
        assert_eq!(snapshot.countdown, "07:00:00");
        assert!(snapshot.is_daylight());
    }

    #[test]
    fn test_one_second_after_sunset() {
        let window = SolarWindow::new(at(6, 0, 0), at(20, 0, 0));
        let mut ephemeris = MockSolarEphemeris::new();
        ephemeris.expect_solar_window().returning(move |_, _| window);

        let reading = evaluate(at(20, 0, 1), Some(berlin()), &ephemeris);
        let snapshot = reading.snapshot().unwrap();

        assert_eq!(snapshot.percentage(), 100.0);
        assert_eq!(snapshot.countdown, "00:00:00");
        assert!(!snapshot.is_daylight());
    }

    #[test]
    fn test_polar_window_reports_zero() {
        let noon = at(12, 0, 0);
        let mut ephemeris = MockSolarEphemeris::new();
        ephemeris
            .expect_solar_window()
            .returning(move |_, _| SolarWindow::new(noon, noon));

        let reading = evaluate(at(9, 0, 0), Some(berlin()), &ephemeris);
        let snapshot = reading.snapshot().unwrap();

        assert_eq!(snapshot.percentage(), 0.0);
        assert_eq!(snapshot.countdown, "03:00:00");
        assert!(!snapshot.is_daylight());
    }

    #[test]
    fn test_window_recomputed_every_call() {
        let window = SolarWindow::new(at(6, 0, 0), at(20, 0, 0));
        let mut ephemeris = MockSolarEphemeris::new();
        ephemeris
            .expect_solar_window()
            .times(3)
            .returning(move |_, _| window);

        for minute in 0..3 {
            let _ = evaluate(at(10, minute, 0), Some(berlin()), &ephemeris);
        }
    }
}
