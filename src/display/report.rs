//! Serializable snapshot of a reading, used by `daywatch now`.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::daylight::DaylightReading;

/// Where "now" falls relative to the day's solar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    AwaitingLocation,
    BeforeSunrise,
    Daylight,
    AfterSunset,
    /// Polar day or night: no usable sunrise/sunset today
    NoHorizonCrossing,
}

impl ReportStatus {
    pub fn of(reading: &DaylightReading) -> Self {
        let Some(snapshot) = reading.snapshot() else {
            return ReportStatus::AwaitingLocation;
        };
        if snapshot.window.is_degenerate() {
            ReportStatus::NoHorizonCrossing
        } else if snapshot.now < snapshot.window.sunrise {
            ReportStatus::BeforeSunrise
        } else if snapshot.now < snapshot.window.sunset {
            ReportStatus::Daylight
        } else {
            ReportStatus::AfterSunset
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ReportStatus::AwaitingLocation => "Awaiting location",
            ReportStatus::BeforeSunrise => "Before sunrise",
            ReportStatus::Daylight => "Daylight",
            ReportStatus::AfterSunset => "After sunset",
            ReportStatus::NoHorizonCrossing => "The sun does not cross the horizon today",
        }
    }
}

/// Flat, serializable view of one reading in host-local time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingReport {
    pub status: ReportStatus,
    pub now: DateTime<Local>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub sunrise: Option<DateTime<Local>>,
    pub sunset: Option<DateTime<Local>>,
    /// Percentage of today's daylight already elapsed
    pub percentage: Option<f64>,
    pub remaining_seconds: Option<i64>,
    pub countdown: Option<String>,
}

impl ReadingReport {
    pub fn from_reading(reading: &DaylightReading, now: DateTime<Local>) -> Self {
        let status = ReportStatus::of(reading);
        match reading.snapshot() {
            None => Self {
                status,
                now,
                latitude: None,
                longitude: None,
                sunrise: None,
                sunset: None,
                percentage: None,
                remaining_seconds: None,
                countdown: None,
            },
            Some(snapshot) => Self {
                status,
                now,
                latitude: Some(snapshot.coordinate.latitude()),
                longitude: Some(snapshot.coordinate.longitude()),
                sunrise: Some(snapshot.window.sunrise.with_timezone(&Local)),
                sunset: Some(snapshot.window.sunset.with_timezone(&Local)),
                percentage: Some(snapshot.progress.percentage),
                remaining_seconds: Some(snapshot.progress.remaining.num_seconds()),
                countdown: Some(snapshot.countdown.clone()),
            },
        }
    }
}
