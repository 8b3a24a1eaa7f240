//! Configuration loading functionality.
//!
//! Handles locating configuration files, applying defaults, and merging the
//! `geo.toml` override.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::validation::validate_config;
use super::{Config, GeoConfig};
use crate::common::constants::*;
use crate::common::utils::private_path;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
///
/// Can only be called once, typically right after argument parsing.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Path of the main configuration file.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}

/// `geo.toml` location for a given main configuration file.
pub fn geo_path_for(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|dir| dir.join(GEO_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(GEO_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// Creates a default configuration file if none exists yet.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        super::builder::create_default_config(&config_path, None)
            .context("Failed to create default config during load")?;
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load configuration from a specific path.
///
/// Unlike [`load`], this does not create a default file when the path is missing.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!(
            "Configuration file not found at specified path: {}",
            private_path(path)
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    // Merge geo.toml before validation so its values are validated too
    load_geo_override_from_path(&mut config, path)?;

    validate_config(&config)?;
    config.apply_defaults();

    Ok(config)
}

/// Apply `geo.toml` coordinates, if present, on top of the main configuration.
pub(crate) fn load_geo_override_from_path(config: &mut Config, config_path: &Path) -> Result<()> {
    let geo_path = geo_path_for(config_path);
    if !geo_path.exists() {
        return Ok(());
    }

    let content = fs::read_to_string(&geo_path)
        .with_context(|| format!("Failed to read {}", private_path(&geo_path)))?;
    let geo: GeoConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", private_path(&geo_path)))?;

    if geo.latitude.is_some() || geo.longitude.is_some() {
        config.latitude = geo.latitude;
        config.longitude = geo.longitude;
    }

    Ok(())
}
