//! Configuration file building and default config creation.
//!
//! Handles writing the commented default configuration and storing
//! coordinates in the private `geo.toml`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::loading::{geo_path_for, get_config_path};
use crate::common::constants::*;
use crate::common::utils::private_path;
use crate::geo::Coordinate;

/// Create a default config file, optionally with a coordinate filled in.
///
/// Without a coordinate the location keys are written commented out, which
/// leaves daywatch in its awaiting-location state until the user sets one.
pub fn create_default_config(path: &Path, coordinate: Option<Coordinate>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = default_config_content(coordinate);
    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));

    Ok(())
}

/// Store a coordinate in `geo.toml` next to the active configuration file.
///
/// Returns the path written.
pub fn update_coordinates(coordinate: Coordinate) -> Result<PathBuf> {
    let config_path = get_config_path()?;
    update_coordinates_at(&config_path, coordinate)
}

/// Store a coordinate in the `geo.toml` belonging to `config_path`.
pub fn update_coordinates_at(config_path: &Path, coordinate: Coordinate) -> Result<PathBuf> {
    let geo_path = geo_path_for(config_path);
    if let Some(parent) = geo_path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = format!(
        "#[Private geo coordinates]\nlatitude = {:.6}\nlongitude = {:.6}\n",
        coordinate.latitude(),
        coordinate.longitude()
    );
    fs::write(&geo_path, content)
        .with_context(|| format!("Failed to write coordinates to {}", private_path(&geo_path)))?;

    Ok(geo_path)
}

fn default_config_content(coordinate: Option<Coordinate>) -> String {
    let builder = ConfigBuilder::new().add_section("Location");

    let builder = match coordinate {
        Some(coordinate) => builder
            .add_setting(
                "latitude",
                &format!("{:.6}", coordinate.latitude()),
                "Geographic latitude (-90 to 90)",
            )
            .add_setting(
                "longitude",
                &format!("{:.6}", coordinate.longitude()),
                "Geographic longitude (-180 to 180)",
            ),
        None => builder
            .add_setting(
                "#latitude",
                "52.520000",
                "Geographic latitude (-90 to 90), or run 'daywatch geo'",
            )
            .add_setting(
                "#longitude",
                "13.405000",
                "Geographic longitude (-180 to 180)",
            ),
    };

    let mut content = builder
        .add_section("Display")
        .add_setting(
            "tick_interval",
            &DEFAULT_TICK_INTERVAL.to_string(),
            &format!(
                "Refresh cadence in milliseconds ({MINIMUM_TICK_INTERVAL}-{MAXIMUM_TICK_INTERVAL})"
            ),
        )
        .add_setting(
            "bar_width",
            &DEFAULT_BAR_WIDTH.to_string(),
            &format!("Progress bar width in cells ({MINIMUM_BAR_WIDTH}-{MAXIMUM_BAR_WIDTH})"),
        )
        .add_setting(
            "bar_fill",
            "\"remaining\"",
            "Fill the bar with \"remaining\" or \"elapsed\" daylight",
        )
        .add_setting(
            "show_tagline",
            &DEFAULT_SHOW_TAGLINE.to_string(),
            "Print the tagline under the version header",
        )
        .build();
    content.push('\n');
    content
}

/// Builds aligned `key = value  # comment` blocks grouped into sections.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // One space between the longest setting and its comment
        let width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.chars().count()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(width - line.chars().count());
                    lines.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_aligns_comments() {
        let content = ConfigBuilder::new()
            .add_section("A")
            .add_setting("x", "1", "short")
            .add_setting("longer_key", "2", "long")
            .build();

        assert_eq!(
            content,
            "#[A]\nx = 1          # short\nlonger_key = 2 # long"
        );
    }

    #[test]
    fn test_default_content_without_coordinate_parses_empty() {
        let content = default_config_content(None);
        let config: super::super::Config = toml::from_str(&content).unwrap();
        assert_eq!(config.latitude, None);
        assert_eq!(config.longitude, None);
        assert_eq!(config.tick_interval, Some(DEFAULT_TICK_INTERVAL));
    }

    #[test]
    fn test_default_content_with_coordinate() {
        let coordinate = Coordinate::new(40.7128, -74.006).unwrap();
        let content = default_config_content(Some(coordinate));
        let config: super::super::Config = toml::from_str(&content).unwrap();
        assert_eq!(config.coordinate(), Some(coordinate));
    }
}
