//! Configuration validation functionality.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;
use crate::geo::Coordinate;

/// Reject configurations that cannot be displayed.
pub fn validate_config(config: &Config) -> Result<()> {
    match (config.latitude, config.longitude) {
        (Some(lat), Some(lon)) => {
            Coordinate::new(lat, lon)?;
        }
        (Some(_), None) => {
            anyhow::bail!("latitude is set but longitude is missing; set both or neither")
        }
        (None, Some(_)) => {
            anyhow::bail!("longitude is set but latitude is missing; set both or neither")
        }
        (None, None) => {}
    }

    if let Some(interval) = config.tick_interval
        && !(MINIMUM_TICK_INTERVAL..=MAXIMUM_TICK_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "tick_interval ({} ms) must be between {} and {} milliseconds",
            interval,
            MINIMUM_TICK_INTERVAL,
            MAXIMUM_TICK_INTERVAL
        );
    }

    if let Some(width) = config.bar_width
        && !(MINIMUM_BAR_WIDTH..=MAXIMUM_BAR_WIDTH).contains(&width)
    {
        anyhow::bail!(
            "bar_width ({}) must be between {} and {} cells",
            width,
            MINIMUM_BAR_WIDTH,
            MAXIMUM_BAR_WIDTH
        );
    }

    Ok(())
}
