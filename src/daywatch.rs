//! Main application runner for the live display.
//!
//! [`Daywatch`] wires the ambient pieces around the tick scheduler:
//!
//! 1. Header and configuration loading
//! 2. Signal handling
//! 3. Location resolution and the config watcher for hot reloads
//! 4. Renderer selection (in-place terminal line or log lines)
//! 5. Running [`Core`] until a signal arrives or a simulation ends
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! // Normal startup
//! daywatch::Daywatch::new(false).run()?;
//!
//! // After `daywatch simulate` has printed its own header
//! daywatch::Daywatch::new(false).without_headers().run()?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::sync::mpsc::{Receiver, channel};

use crate::{
    commands::resolve_coordinate,
    common::{constants::TAGLINE, utils::TerminalGuard},
    config::{self, Config, ConfigWatcher, LocationUpdate},
    core::{Core, CoreParams},
    display::{DisplayOptions, LogRenderer, Renderer, TerminalRenderer},
    geo::{Coordinate, SunriseEphemeris},
    signals::setup_signal_handler,
    time_source,
};

/// Builder for running the daywatch display.
pub struct Daywatch {
    debug_enabled: bool,
    show_headers: bool,
    coordinate: Option<(f64, f64)>,
}

impl Daywatch {
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            show_headers: true,
            coordinate: None,
        }
    }

    /// Use this coordinate instead of the configured one.
    ///
    /// Disables location hot reloading for the session.
    pub fn with_coordinate(mut self, coordinate: Option<(f64, f64)>) -> Self {
        self.coordinate = coordinate;
        self
    }

    /// Skip the version header (already printed by the caller)
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    pub fn run(self) -> Result<()> {
        if self.show_headers {
            log_version!();
            if self.debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled");
            }
        }

        let config = Config::load().context("Configuration failed")?;
        if config.show_tagline() {
            log_decorated!("{TAGLINE}");
        }
        config.log_config();

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        let coordinate = resolve_coordinate(self.coordinate, &config)?;
        let location_updates = if self.coordinate.is_some() {
            log_block_start!("Using location from the command line");
            None
        } else {
            self.start_watcher(coordinate)
        };

        if coordinate.is_none() {
            log_block_start!("No location configured, awaiting one");
            log_indented!("Run 'daywatch geo <latitude> <longitude>' to set it");
        }

        let clock = time_source::current();
        let options = DisplayOptions::from_config(&config);
        let interactive = std::io::stdout().is_terminal() && !clock.is_simulated();
        let renderer: Box<dyn Renderer> = if interactive {
            log_block_start!("Tracking daylight, press Ctrl+C to stop");
            log_end!();
            Box::new(TerminalRenderer::stdout(options))
        } else {
            Box::new(LogRenderer::new(options, self.debug_enabled))
        };

        let _term = TerminalGuard::new().context("failed to initialize terminal features")?;

        let core = Core::new(CoreParams {
            config,
            coordinate,
            ephemeris: Box::new(SunriseEphemeris),
            renderer,
            clock: clock.clone(),
            running: signal_state.running.clone(),
            location_updates,
            debug_enabled: self.debug_enabled,
        });
        core.execute()?;

        if !interactive {
            if clock.is_ended() {
                log_block_start!("Simulation complete");
            } else {
                log_block_start!("Shutting down");
            }
            log_end!();
        }
        Ok(())
    }

    /// Start the config watcher, or log why hot reloading is unavailable.
    fn start_watcher(&self, coordinate: Option<Coordinate>) -> Option<Receiver<LocationUpdate>> {
        let config_path = match config::get_config_path() {
            Ok(path) => path,
            Err(e) => {
                log_pipe!();
                log_warning!("Location hot reload unavailable: {e}");
                return None;
            }
        };

        let (tx, rx) = channel();
        match ConfigWatcher::new(config_path, tx, coordinate, self.debug_enabled).start() {
            Ok(()) => Some(rx),
            Err(e) => {
                log_pipe!();
                log_warning!("Location hot reload unavailable: {e}");
                None
            }
        }
    }
}
