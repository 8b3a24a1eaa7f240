//! Help command implementation for daywatch.

use anyhow::Result;

/// Run the help command.
///
/// `None` shows the command overview.
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("now") | Some("n") => super::now::display_help(),
        Some("geo") | Some("g") => super::geo::display_help(),
        Some("simulate") | Some("S") => super::simulate::display_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("now, n [--json]             Print the current reading and exit");
    log_indented!("geo, g <lat> <lon>          Store your location in geo.toml");
    log_indented!("simulate, S <start> <end>   Replay a time span on an accelerated clock");
    log_indented!("help, h [COMMAND]           Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'daywatch help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'daywatch --help' to see all options and general usage.");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: daywatch help [COMMAND]");
    log_block_start!("Examples:");
    log_indented!("daywatch help");
    log_indented!("daywatch help simulate");
    log_end!();
}
