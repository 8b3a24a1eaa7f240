//! Command-line argument parsing and processing.
//!
//! Arguments are parsed by hand into a [`CliAction`]. Flags may appear before
//! or after the command; bare numbers are treated as positional values so that
//! negative coordinates such as `-74.006` are not mistaken for flags.

use crate::common::constants::{
    DEFAULT_SIMULATION_MULTIPLIER, MAXIMUM_SIMULATION_MULTIPLIER, MINIMUM_SIMULATION_MULTIPLIER,
};

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the live display
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        /// `--lat`/`--lon` override of the configured location
        coordinate: Option<(f64, f64)>,
    },
    /// Print a single reading and exit
    NowCommand {
        json: bool,
        config_dir: Option<String>,
        coordinate: Option<(f64, f64)>,
    },
    /// Store a coordinate in geo.toml
    GeoCommand {
        debug_enabled: bool,
        latitude: f64,
        longitude: f64,
        config_dir: Option<String>,
    },
    /// Run the display on simulated time
    Simulate {
        debug_enabled: bool,
        start_time: String,
        end_time: String,
        /// 0.0 selects fast-forward
        multiplier: f64,
        config_dir: Option<String>,
        coordinate: Option<(f64, f64)>,
    },
    /// Show help for one command, or general command help
    HelpCommand { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        ParsedArgs {
            action: Self::parse_action(&args_vec),
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }

    fn parse_action(args_vec: &[String]) -> CliAction {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut json = false;
        let mut fast_forward = false;
        let mut config_dir: Option<String> = None;
        let mut latitude: Option<f64> = None;
        let mut longitude: Option<f64> = None;
        let mut unknown_arg_found = false;
        let mut positionals: Vec<&str> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--json" | "-j" => json = true,
                "--fast-forward" | "-f" => fast_forward = true,
                "--config" | "-c" => match args_vec.get(i + 1) {
                    Some(dir) if !dir.starts_with('-') => {
                        config_dir = Some(dir.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        unknown_arg_found = true;
                    }
                },
                "--lat" | "--lon" => {
                    match args_vec.get(i + 1).map(|value| value.parse::<f64>()) {
                        Some(Ok(value)) => {
                            if arg == "--lat" {
                                latitude = Some(value);
                            } else {
                                longitude = Some(value);
                            }
                            i += 1;
                        }
                        _ => {
                            log_warning!("{arg} expects a number in decimal degrees");
                            unknown_arg_found = true;
                        }
                    }
                }
                _ if arg.starts_with('-') && arg.parse::<f64>().is_err() => {
                    log_warning!("Unknown argument: {}", arg);
                    unknown_arg_found = true;
                }
                _ => positionals.push(arg),
            }
            i += 1;
        }

        if display_version {
            return CliAction::ShowVersion;
        }
        if display_help {
            return CliAction::ShowHelp;
        }
        if unknown_arg_found {
            return CliAction::ShowHelpDueToError;
        }

        let coordinate = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            (None, None) => None,
            _ => {
                log_warning!("--lat and --lon must be given together");
                return CliAction::ShowHelpDueToError;
            }
        };

        let Some((&command, rest)) = positionals.split_first() else {
            if json || fast_forward {
                log_warning!("--json and --fast-forward need a command ('now' or 'simulate')");
                return CliAction::ShowHelpDueToError;
            }
            return CliAction::Run {
                debug_enabled,
                config_dir,
                coordinate,
            };
        };

        if json && !matches!(command, "now" | "n") {
            log_warning!("--json is only supported by the 'now' command");
            return CliAction::ShowHelpDueToError;
        }
        if fast_forward && !matches!(command, "simulate" | "S") {
            log_warning!("--fast-forward is only supported by the 'simulate' command");
            return CliAction::ShowHelpDueToError;
        }

        match command {
            "now" | "n" => {
                if !rest.is_empty() {
                    log_warning!("'now' takes no arguments. Usage: daywatch now [--json]");
                    return CliAction::ShowHelpDueToError;
                }
                CliAction::NowCommand {
                    json,
                    config_dir,
                    coordinate,
                }
            }
            "geo" | "g" => match rest {
                [lat, lon] => match (lat.parse::<f64>(), lon.parse::<f64>()) {
                    (Ok(latitude), Ok(longitude)) => CliAction::GeoCommand {
                        debug_enabled,
                        latitude,
                        longitude,
                        config_dir,
                    },
                    _ => {
                        log_warning!(
                            "Invalid coordinates. Usage: daywatch geo <latitude> <longitude>"
                        );
                        CliAction::ShowHelpDueToError
                    }
                },
                _ => {
                    log_warning!("Usage: daywatch geo <latitude> <longitude>");
                    CliAction::ShowHelpDueToError
                }
            },
            "simulate" | "S" => {
                let (start, end, multiplier) = match rest {
                    [start, end] => (start, end, None),
                    [start, end, multiplier] => (start, end, Some(*multiplier)),
                    _ => {
                        log_warning!(
                            "Usage: daywatch simulate <start> <end> [multiplier] [--fast-forward]"
                        );
                        return CliAction::ShowHelpDueToError;
                    }
                };

                let multiplier = if fast_forward {
                    0.0
                } else {
                    match multiplier.map(str::parse::<f64>) {
                        None => DEFAULT_SIMULATION_MULTIPLIER,
                        Some(Ok(value))
                            if (MINIMUM_SIMULATION_MULTIPLIER..=MAXIMUM_SIMULATION_MULTIPLIER)
                                .contains(&value) =>
                        {
                            value
                        }
                        Some(_) => {
                            log_warning!(
                                "Multiplier must be between {} and {}",
                                MINIMUM_SIMULATION_MULTIPLIER,
                                MAXIMUM_SIMULATION_MULTIPLIER
                            );
                            return CliAction::ShowHelpDueToError;
                        }
                    }
                };

                CliAction::Simulate {
                    debug_enabled,
                    start_time: start.to_string(),
                    end_time: end.to_string(),
                    multiplier,
                    config_dir,
                    coordinate,
                }
            }
            "help" | "h" => match rest {
                [] => CliAction::HelpCommand { command: None },
                [command] => CliAction::HelpCommand {
                    command: Some(command.to_string()),
                },
                _ => {
                    log_warning!("Usage: daywatch help [COMMAND]");
                    CliAction::ShowHelpDueToError
                }
            },
            _ => {
                log_warning!("Unknown command: {}", command);
                CliAction::ShowHelpDueToError
            }
        }
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_decorated!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("daywatch [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("    --lat <degrees>    Override the configured latitude");
    log_indented!("    --lon <degrees>    Override the configured longitude");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("now, n [--json]             Print the current reading and exit");
    log_indented!("geo, g <lat> <lon>          Store your location in geo.toml");
    log_indented!("simulate, S <start> <end>   Replay a time span on an accelerated clock");
    log_indented!("help, h [COMMAND]           Show detailed help for a command");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["daywatch"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                debug_enabled: false,
                config_dir: None,
                coordinate: None,
            }
        );
    }

    #[test]
    fn test_parse_debug_and_config() {
        assert_eq!(
            parse(&["-d", "--config", "/tmp/dw"]),
            CliAction::Run {
                debug_enabled: true,
                config_dir: Some("/tmp/dw".to_string()),
                coordinate: None,
            }
        );
    }

    #[test]
    fn test_parse_coordinate_override_accepts_negatives() {
        assert_eq!(
            parse(&["--lat", "-33.8688", "--lon", "151.2093"]),
            CliAction::Run {
                debug_enabled: false,
                config_dir: None,
                coordinate: Some((-33.8688, 151.2093)),
            }
        );
    }

    #[test]
    fn test_parse_half_coordinate_is_error() {
        assert_eq!(parse(&["--lat", "10"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--lon", "east"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_help_and_version_precedence() {
        assert_eq!(parse(&["--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-d", "-h"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-v"]), CliAction::ShowVersion);
        assert_eq!(parse(&["--version", "--help"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_unknown_flag_and_command() {
        assert_eq!(parse(&["--unknown"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["sunbathe"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_now() {
        assert_eq!(
            parse(&["now", "--json"]),
            CliAction::NowCommand {
                json: true,
                config_dir: None,
                coordinate: None,
            }
        );
        assert_eq!(parse(&["now", "extra"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--json"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_geo_with_negative_longitude() {
        assert_eq!(
            parse(&["geo", "40.7128", "-74.0060"]),
            CliAction::GeoCommand {
                debug_enabled: false,
                latitude: 40.7128,
                longitude: -74.006,
                config_dir: None,
            }
        );
        assert_eq!(parse(&["geo", "40.7128"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["g", "north", "west"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_simulate_default_multiplier() {
        assert_eq!(
            parse(&["simulate", "2024-06-21 04:00:00", "2024-06-21 23:00:00"]),
            CliAction::Simulate {
                debug_enabled: false,
                start_time: "2024-06-21 04:00:00".to_string(),
                end_time: "2024-06-21 23:00:00".to_string(),
                multiplier: DEFAULT_SIMULATION_MULTIPLIER,
                config_dir: None,
                coordinate: None,
            }
        );
    }

    #[test]
    fn test_parse_simulate_multiplier_and_fast_forward() {
        let action = parse(&["S", "2024-06-21 04:00:00", "2024-06-21 23:00:00", "60"]);
        assert!(matches!(action, CliAction::Simulate { multiplier, .. } if multiplier == 60.0));

        let action = parse(&["simulate", "a", "b", "--fast-forward"]);
        assert!(matches!(action, CliAction::Simulate { multiplier, .. } if multiplier == 0.0));

        assert_eq!(parse(&["simulate", "a", "b", "-5"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["simulate", "a", "b", "0.05"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["simulate", "a"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["now", "-f"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_simulate_multiplier_bounds() {
        let start = "2024-06-21 04:00:00";
        let end = "2024-06-21 23:00:00";
        assert_eq!(parse(&["simulate", start, end, "1e300"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["simulate", start, end, "3600.5"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["simulate", start, end, "inf"]), CliAction::ShowHelpDueToError);

        let action = parse(&["simulate", start, end, "3600"]);
        assert!(matches!(action, CliAction::Simulate { multiplier, .. } if multiplier == 3600.0));
        let action = parse(&["simulate", start, end, "0.1"]);
        assert!(matches!(action, CliAction::Simulate { multiplier, .. } if multiplier == 0.1));
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(parse(&["help"]), CliAction::HelpCommand { command: None });
        assert_eq!(
            parse(&["help", "geo"]),
            CliAction::HelpCommand {
                command: Some("geo".to_string())
            }
        );
    }
}
