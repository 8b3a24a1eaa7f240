//! `daywatch simulate`: run the display on an accelerated clock.
//!
//! Installs a [`SimulatedTimeSource`] as the global clock and returns; the
//! caller then runs the display as usual.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::time_source::{self, SimulatedTimeSource};

/// Set up simulated time between `start_time` and `end_time`.
///
/// `multiplier` of 0.0 selects fast-forward.
pub fn handle_simulate_command(
    start_time: &str,
    end_time: &str,
    multiplier: f64,
    debug_enabled: bool,
) -> Result<()> {
    let (start, end) = parse_span(start_time, end_time)?;

    // Before any logging, so timestamps come from the simulated clock
    let source = Arc::new(SimulatedTimeSource::new(start, end, multiplier));
    let fast_forward = source.is_fast_forward();
    let multiplier = source.multiplier();
    time_source::init_time_source(source);

    log_version!();
    log_block_start!("Simulation Mode");
    log_decorated!(
        "Simulating from {} to {}",
        start.format("%Y-%m-%d %H:%M:%S"),
        end.format("%Y-%m-%d %H:%M:%S")
    );

    let duration = end.signed_duration_since(start);
    log_indented!(
        "Total simulated time: {} hours {} minutes",
        duration.num_hours(),
        duration.num_minutes() % 60
    );
    if fast_forward {
        log_indented!("Time acceleration: fast-forward (instant execution)");
    } else {
        log_indented!(
            "Time acceleration: {}x (will complete in ~{:.1} seconds)",
            multiplier as u64,
            duration.num_seconds() as f64 / multiplier
        );
    }

    if debug_enabled {
        log_pipe!();
        log_debug!("Simulated time source initialized");
    }
    Ok(())
}

/// Parse both ends of the span and require a positive length.
fn parse_span(start_time: &str, end_time: &str) -> Result<(DateTime<Local>, DateTime<Local>)> {
    let start =
        time_source::parse_datetime(start_time).map_err(|e| anyhow!("Invalid start time: {e}"))?;
    let end =
        time_source::parse_datetime(end_time).map_err(|e| anyhow!("Invalid end time: {e}"))?;

    if end <= start {
        anyhow::bail!("End time must be after start time");
    }
    Ok((start, end))
}

/// Display detailed help for the simulate command
pub fn display_help() {
    log_version!();
    log_block_start!("simulate - Replay a time span on an accelerated clock");
    log_block_start!("Usage: daywatch simulate <start> <end> [multiplier] [--fast-forward]");
    log_block_start!("Arguments:");
    log_indented!("start, end   Host-local times as \"YYYY-MM-DD HH:MM:SS\"");
    log_indented!("multiplier   Simulated seconds per real second (default 3600)");
    log_block_start!("Options:");
    log_indented!("-f, --fast-forward   Advance by one tick per loop without waiting");
    log_block_start!("Examples:");
    log_indented!("daywatch simulate \"2024-06-21 04:00:00\" \"2024-06-21 23:00:00\"");
    log_indented!("daywatch simulate \"2024-12-21 06:00:00\" \"2024-12-21 18:00:00\" -f");
    log_end!();
}
