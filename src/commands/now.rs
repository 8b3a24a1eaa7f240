//! `daywatch now`: print one reading and exit.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};

use crate::config::Config;
use crate::daylight::{DaylightReading, evaluate};
use crate::display::{DisplayOptions, ReadingReport, status_line};
use crate::geo::{Coordinate, SolarEphemeris, SunriseEphemeris};
use crate::logger::Log;
use crate::time_source;

/// Handle the now command.
///
/// With `json` the logger is silenced so stdout carries only the report.
pub fn handle_now_command(json: bool, coordinate: Option<(f64, f64)>) -> Result<()> {
    if json {
        Log::set_enabled(false);
        let result = print_json(coordinate);
        Log::set_enabled(true);
        return result;
    }

    log_version!();
    let config = Config::load()?;
    let coordinate = super::resolve_coordinate(coordinate, &config)?;
    let now = time_source::now();
    let reading = reading_at(now, coordinate, &SunriseEphemeris);
    let report = ReadingReport::from_reading(&reading, now);

    log_block_start!("{}", report.status.describe());
    match reading.snapshot() {
        Some(snapshot) => {
            log_indented!("Location: {}", snapshot.coordinate);
            log_indented!("Sunrise:  {}", format_local(report.sunrise));
            log_indented!("Sunset:   {}", format_local(report.sunset));
            log_indented!("Elapsed:  {:.1}%", snapshot.percentage());
            log_indented!("Left:     {}", snapshot.countdown);
        }
        None => {
            log_indented!("No location configured.");
            log_indented!("Run 'daywatch geo <latitude> <longitude>' or pass --lat/--lon");
        }
    }
    log_block_start!("{}", status_line(&reading, DisplayOptions::from_config(&config)));
    log_end!();
    Ok(())
}

fn print_json(coordinate: Option<(f64, f64)>) -> Result<()> {
    let config = Config::load()?;
    let coordinate = super::resolve_coordinate(coordinate, &config)?;
    let now = time_source::now();
    let reading = reading_at(now, coordinate, &SunriseEphemeris);
    println!("{}", report_json(&ReadingReport::from_reading(&reading, now))?);
    Ok(())
}

fn reading_at<E: SolarEphemeris + ?Sized>(
    now: DateTime<Local>,
    coordinate: Option<Coordinate>,
    ephemeris: &E,
) -> DaylightReading {
    evaluate(now.with_timezone(&Utc), coordinate, ephemeris)
}

fn report_json(report: &ReadingReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize reading")
}

fn format_local(time: Option<DateTime<Local>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Display detailed help for the now command
pub fn display_help() {
    log_version!();
    log_block_start!("now - Print the current daylight reading");
    log_block_start!("Usage: daywatch now [--json] [--lat <degrees> --lon <degrees>]");
    log_block_start!("Description:");
    log_indented!("Computes today's sunrise and sunset for your location and prints");
    log_indented!("how much of the daylight is spent and how long until sunset.");
    log_block_start!("Options:");
    log_indented!("-j, --json   Print a JSON report instead, for scripts and status bars");
    log_block_start!("Examples:");
    log_indented!("daywatch now");
    log_indented!("daywatch now --json --lat 40.7128 --lon -74.0060");
    log_end!();
}
