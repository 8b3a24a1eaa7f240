//! Geographic coordinates and solar ephemeris lookups.
//!
//! This module provides the location side of daywatch: a validated
//! [`Coordinate`] type and the [`solar`] provider that turns a coordinate and
//! an instant into that day's sunrise and sunset.
//!
//! ## Module Structure
//!
//! - [`solar`]: `SolarEphemeris` trait and the `sunrise`-crate implementation,
//!   including the fallback used at extreme latitudes

pub mod solar;

use anyhow::Result;
use std::fmt;

pub use solar::{SolarEphemeris, SunriseEphemeris};


/// A point on the globe in decimal degrees.
///
/// Construction validates the ranges, so any `Coordinate` in hand is usable by
/// the ephemeris without further checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside -90..=90 / -180..=180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            anyhow::bail!("latitude must be between -90 and 90 degrees (got {latitude})");
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!("longitude must be between -180 and 180 degrees (got {longitude})");
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{ns}, {:.4}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}
