//! Signal handling for daywatch.
//!
//! SIGINT, SIGTERM and SIGHUP all mean "stop": a background thread clears
//! the shared running flag and the tick scheduler exits at its next tick
//! boundary, which lets the renderer and the terminal guard clean up.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

/// Signal handling state shared between threads
pub struct SignalState {
    /// Cleared once a shutdown signal arrives
    pub running: Arc<AtomicBool>,
}

fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGHUP => "SIGHUP",
        _ => "signal",
    }
}

/// Register the shutdown signals and spawn the thread that watches them.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    let running_clone = running.clone();
    thread::spawn(move || {
        for sig in signals.forever() {
            if debug_enabled {
                log_pipe!();
                log_debug!("Received {}, shutting down", signal_name(sig));
            }
            running_clone.store(false, Ordering::SeqCst);
            break;
        }
    });

    Ok(SignalState { running })
}
