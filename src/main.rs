//! Daywatch binary: argument dispatch.
//!
//! All behaviour lives in the library; this file maps each [`CliAction`] to
//! the code that handles it and turns errors into a logged exit status.

use anyhow::Result;
use daywatch::{
    Daywatch,
    args::{self, CliAction, ParsedArgs},
    commands,
    common::constants::EXIT_FAILURE,
    config, log_error_exit,
};

fn main() {
    if let Err(e) = run() {
        log_error_exit!("{e:#}");
        std::process::exit(EXIT_FAILURE);
    }
}

fn run() -> Result<()> {
    match ParsedArgs::from_env().action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::HelpCommand { command } => commands::help::run_help_command(command.as_deref()),
        CliAction::Run {
            debug_enabled,
            config_dir,
            coordinate,
        } => {
            config::set_config_dir(config_dir)?;
            Daywatch::new(debug_enabled)
                .with_coordinate(coordinate)
                .run()
        }
        CliAction::NowCommand {
            json,
            config_dir,
            coordinate,
        } => {
            config::set_config_dir(config_dir)?;
            commands::now::handle_now_command(json, coordinate)
        }
        CliAction::GeoCommand {
            debug_enabled,
            latitude,
            longitude,
            config_dir,
        } => {
            config::set_config_dir(config_dir)?;
            commands::geo::handle_geo_command(latitude, longitude, debug_enabled)
        }
        CliAction::Simulate {
            debug_enabled,
            start_time,
            end_time,
            multiplier,
            config_dir,
            coordinate,
        } => {
            config::set_config_dir(config_dir)?;
            commands::simulate::handle_simulate_command(
                &start_time,
                &end_time,
                multiplier,
                debug_enabled,
            )?;
            // Header already shown by the simulate command
            Daywatch::new(debug_enabled)
                .with_coordinate(coordinate)
                .without_headers()
                .run()
        }
    }
}
