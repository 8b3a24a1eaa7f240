//! Command-line command handlers for daywatch.
//!
//! Each one-shot command lives in its own submodule. The live display itself
//! is run by [`crate::Daywatch`].

pub mod geo;
pub mod help;
pub mod now;
pub mod simulate;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::geo::Coordinate;

/// Pick the coordinate to display: a `--lat`/`--lon` override wins over the
/// configuration. An invalid override is an error rather than a fallback.
pub fn resolve_coordinate(
    override_pair: Option<(f64, f64)>,
    config: &Config,
) -> Result<Option<Coordinate>> {
    match override_pair {
        Some((latitude, longitude)) => Coordinate::new(latitude, longitude)
            .map(Some)
            .context("Invalid --lat/--lon override"),
        None => Ok(config.coordinate()),
    }
}
