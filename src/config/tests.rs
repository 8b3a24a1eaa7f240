use super::builder::update_coordinates_at;
use super::loading::load_geo_override_from_path;
use super::validation::validate_config;
use super::*;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use tempfile::tempdir;

fn create_test_config(latitude: Option<f64>, longitude: Option<f64>) -> Config {
    Config {
        latitude,
        longitude,
        tick_interval: Some(100),
        bar_width: Some(30),
        bar_fill: Some(BarFill::Remaining),
        show_tagline: Some(true),
    }
}

fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_validation_basic() {
    let config = create_test_config(Some(52.52), Some(13.405));
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_without_location() {
    let config = create_test_config(None, None);
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.coordinate(), None);
}

#[test]
fn test_config_validation_half_coordinate() {
    let config = create_test_config(Some(52.52), None);
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("longitude is missing"));

    let config = create_test_config(None, Some(13.405));
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_config_validation_coordinate_ranges() {
    assert!(validate_config(&create_test_config(Some(90.5), Some(0.0))).is_err());
    assert!(validate_config(&create_test_config(Some(0.0), Some(-180.5))).is_err());
    assert!(validate_config(&create_test_config(Some(-90.0), Some(180.0))).is_ok());
}

#[test]
fn test_config_validation_tick_interval_limits() {
    let mut config = create_test_config(None, None);

    config.tick_interval = Some(MINIMUM_TICK_INTERVAL);
    assert!(validate_config(&config).is_ok());
    config.tick_interval = Some(MAXIMUM_TICK_INTERVAL);
    assert!(validate_config(&config).is_ok());

    config.tick_interval = Some(MINIMUM_TICK_INTERVAL - 1);
    assert!(validate_config(&config).is_err());
    config.tick_interval = Some(MAXIMUM_TICK_INTERVAL + 1);
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_config_validation_bar_width_limits() {
    let mut config = create_test_config(None, None);

    config.bar_width = Some(MINIMUM_BAR_WIDTH - 1);
    assert!(validate_config(&config).is_err());
    config.bar_width = Some(MAXIMUM_BAR_WIDTH + 1);
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_config_defaults_applied() {
    let mut config = Config::default();
    config.apply_defaults();

    assert_eq!(config.tick_interval, Some(DEFAULT_TICK_INTERVAL));
    assert_eq!(config.bar_width, Some(DEFAULT_BAR_WIDTH));
    assert_eq!(config.bar_fill, Some(BarFill::Remaining));
    assert_eq!(config.show_tagline, Some(DEFAULT_SHOW_TAGLINE));
    assert_eq!(
        config.tick_interval(),
        std::time::Duration::from_millis(DEFAULT_TICK_INTERVAL)
    );
}

#[test]
fn test_load_from_path_full() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        r#"
latitude = 40.7128
longitude = -74.0060
tick_interval = 250
bar_width = 40
bar_fill = "elapsed"
show_tagline = false
"#,
    );

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.coordinate(), Some(Coordinate::new(40.7128, -74.006).unwrap()));
    assert_eq!(config.tick_interval(), std::time::Duration::from_millis(250));
    assert_eq!(config.bar_width(), 40);
    assert_eq!(config.bar_fill(), BarFill::Elapsed);
    assert!(!config.show_tagline());
}

#[test]
fn test_load_from_path_minimal_gets_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "");

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.coordinate(), None);
    assert_eq!(config.bar_width(), DEFAULT_BAR_WIDTH);
    assert_eq!(config.bar_fill(), BarFill::Remaining);
}

#[test]
fn test_load_from_path_rejects_unknown_fields() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "night_temp = 3300\n");
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_load_from_path_rejects_bad_bar_fill() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "bar_fill = \"sideways\"\n");
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_load_from_missing_path() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("missing.toml");
    let err = load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_geo_toml_overrides_main_config() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "latitude = 10.0\nlongitude = 20.0\n");
    fs::write(
        temp_dir.path().join(GEO_FILE_NAME),
        "latitude = -33.8688\nlongitude = 151.2093\n",
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.latitude, Some(-33.8688));
    assert_eq!(config.longitude, Some(151.2093));
}

#[test]
fn test_geo_toml_invalid_values_are_validated() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "");
    fs::write(
        temp_dir.path().join(GEO_FILE_NAME),
        "latitude = 123.0\nlongitude = 0.0\n",
    )
    .unwrap();

    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_empty_geo_toml_keeps_main_coordinates() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "latitude = 10.0\nlongitude = 20.0\n");
    fs::write(temp_dir.path().join(GEO_FILE_NAME), "# nothing yet\n").unwrap();

    let mut config = create_test_config(Some(10.0), Some(20.0));
    load_geo_override_from_path(&mut config, &path).unwrap();
    assert_eq!(config.latitude, Some(10.0));
    assert_eq!(config.longitude, Some(20.0));
}

#[test]
fn test_create_default_config_then_load() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

    create_default_config(&path, None).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.coordinate(), None);
    assert_eq!(config.tick_interval(), std::time::Duration::from_millis(100));
}

#[test]
fn test_update_coordinates_writes_geo_file() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "");
    let coordinate = Coordinate::new(48.8566, 2.3522).unwrap();

    let geo_path = update_coordinates_at(&path, coordinate).unwrap();
    assert_eq!(geo_path, temp_dir.path().join(GEO_FILE_NAME));

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.coordinate(), Some(coordinate));
}

#[test]
fn test_watcher_reports_new_coordinate() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "");
    let (tx, _rx) = channel();
    let mut watcher = ConfigWatcher::new(path.clone(), tx, None, false);

    // Nothing changed yet
    assert_eq!(watcher.check_for_change(), None);

    let coordinate = Coordinate::new(35.6762, 139.6503).unwrap();
    update_coordinates_at(&path, coordinate).unwrap();
    assert_eq!(
        watcher.check_for_change(),
        Some(LocationUpdate::Available(coordinate))
    );

    // Same coordinate again is not a change
    assert_eq!(watcher.check_for_change(), None);

    fs::remove_file(temp_dir.path().join(GEO_FILE_NAME)).unwrap();
    assert_eq!(
        watcher.check_for_change(),
        Some(LocationUpdate::Unavailable)
    );
}

#[test]
fn test_watcher_ignores_invalid_edit() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "latitude = 1.0\nlongitude = 2.0\n");
    let current = Coordinate::new(1.0, 2.0).unwrap();
    let (tx, _rx) = channel();
    let mut watcher = ConfigWatcher::new(path.clone(), tx, Some(current), false);

    crate::logger::Log::set_enabled(false);
    fs::write(&path, "latitude = 1.0\n").unwrap();
    let update = watcher.check_for_change();
    crate::logger::Log::set_enabled(true);

    assert_eq!(update, None);
}

#[test]
#[serial]
fn test_config_path_follows_xdg_config_home() {
    let temp_dir = tempdir().unwrap();

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let path = get_config_path();

    unsafe {
        match original {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    // Only meaningful on platforms where dirs honours XDG_CONFIG_HOME
    if cfg!(target_os = "linux") {
        assert_eq!(
            path.unwrap(),
            temp_dir.path().join(APP_NAME).join(CONFIG_FILE_NAME)
        );
    }
}
