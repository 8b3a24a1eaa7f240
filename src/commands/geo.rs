//! `daywatch geo`: store the coordinate in `geo.toml`.

use anyhow::Result;
use chrono::{Local, Utc};

use crate::common::utils::private_path;
use crate::config::update_coordinates;
use crate::geo::{Coordinate, SolarEphemeris, SunriseEphemeris};
use crate::time_source;

/// Validate and save a coordinate.
///
/// A running daywatch sees the new `geo.toml` through its config watcher, so
/// nothing needs restarting.
pub fn handle_geo_command(latitude: f64, longitude: f64, debug_enabled: bool) -> Result<()> {
    let coordinate = Coordinate::new(latitude, longitude)?;

    log_version!();
    let geo_path = update_coordinates(coordinate)?;
    log_block_start!("Location set to {coordinate}");
    log_indented!("Saved to {}", private_path(&geo_path));

    let now = time_source::now().with_timezone(&Utc);
    let window = SunriseEphemeris.solar_window(now, coordinate);
    if window.is_degenerate() {
        log_block_start!("The sun does not cross the horizon here today");
    } else {
        log_block_start!(
            "Today: sunrise {}, sunset {}",
            window.sunrise.with_timezone(&Local).format("%H:%M:%S"),
            window.sunset.with_timezone(&Local).format("%H:%M:%S")
        );
    }

    if debug_enabled {
        log_pipe!();
        log_debug!("A running instance reloads the location automatically");
    }
    log_end!();
    Ok(())
}

/// Display detailed help for the geo command
pub fn display_help() {
    log_version!();
    log_block_start!("geo - Store your location");
    log_block_start!("Usage: daywatch geo <latitude> <longitude>");
    log_block_start!("Description:");
    log_indented!("Saves the coordinate to geo.toml next to daywatch.toml. The");
    log_indented!("separate file keeps your location out of a shared or version");
    log_indented!("controlled configuration. A running daywatch picks it up");
    log_indented!("without a restart.");
    log_block_start!("Arguments:");
    log_indented!("latitude   Decimal degrees, -90 to 90 (north is positive)");
    log_indented!("longitude  Decimal degrees, -180 to 180 (east is positive)");
    log_block_start!("Examples:");
    log_indented!("daywatch geo 52.5200 13.4050");
    log_indented!("daywatch geo 40.7128 -74.0060");
    log_end!();
}
