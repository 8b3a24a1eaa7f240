//! File watching for hot coordinate reloads.
//!
//! A running display keeps its coordinate until the user edits
//! `daywatch.toml` or `geo.toml` (or runs `daywatch geo`). The watcher turns
//! those edits into [`LocationUpdate`] messages for the tick scheduler.

use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::Duration;

use super::loading::{geo_path_for, load_from_path};
use crate::common::constants::CONFIG_WATCH_DEBOUNCE_MS;
use crate::common::utils::private_path;
use crate::geo::Coordinate;

/// A change in the configured location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationUpdate {
    /// A new coordinate is configured.
    Available(Coordinate),
    /// The coordinate was removed from the configuration.
    Unavailable,
}

impl LocationUpdate {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            LocationUpdate::Available(coordinate) => Some(*coordinate),
            LocationUpdate::Unavailable => None,
        }
    }
}

/// Watches the configuration directory and forwards coordinate changes.
pub struct ConfigWatcher {
    config_path: PathBuf,
    sender: Sender<LocationUpdate>,
    last_coordinate: Option<Coordinate>,
    debug_enabled: bool,
}

impl ConfigWatcher {
    /// Create a watcher for `config_path`, starting from the coordinate already
    /// in use so the first reload does not repeat it.
    pub fn new(
        config_path: PathBuf,
        sender: Sender<LocationUpdate>,
        current: Option<Coordinate>,
        debug_enabled: bool,
    ) -> Self {
        Self {
            config_path,
            sender,
            last_coordinate: current,
            debug_enabled,
        }
    }

    /// Start watching in a background thread.
    ///
    /// The thread ends when the receiving side of the update channel is dropped.
    pub fn start(self) -> Result<()> {
        let watch_dir = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .context("Configuration path has no parent directory")?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res
                    && matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    )
                {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        // Watch the directory rather than the files so editor replace-on-save is seen
        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", watch_dir.display()))?;

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Watching for location changes in {}", private_path(&watch_dir));
        }

        thread::spawn(move || {
            // The watcher stops when dropped, so it lives on this thread
            let _watcher = watcher;
            self.run(rx);
        });

        Ok(())
    }

    fn run(mut self, events: Receiver<Event>) {
        while let Ok(event) = events.recv() {
            if !self.is_relevant(&event) {
                continue;
            }

            // Swallow the burst of events a single save produces
            loop {
                match events.recv_timeout(Duration::from_millis(CONFIG_WATCH_DEBOUNCE_MS)) {
                    Ok(_) => continue,
                    Err(RecvTimeoutError::Timeout) => break,
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            }

            if let Some(update) = self.check_for_change()
                && self.sender.send(update).is_err()
            {
                return;
            }
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        let geo_path = geo_path_for(&self.config_path);
        event.paths.iter().any(|path| {
            path.file_name() == self.config_path.file_name()
                || path.file_name() == geo_path.file_name()
        })
    }

    /// Reload the configuration and report a coordinate change, if any.
    ///
    /// Invalid edits are logged and ignored; the previous coordinate stays.
    pub(crate) fn check_for_change(&mut self) -> Option<LocationUpdate> {
        let config = match load_from_path(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                log_pipe!();
                log_warning!("Ignoring configuration change: {e:#}");
                return None;
            }
        };

        let next = config.coordinate();
        if next == self.last_coordinate {
            return None;
        }
        self.last_coordinate = next;

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Configuration reloaded after file change");
        }

        Some(match next {
            Some(coordinate) => LocationUpdate::Available(coordinate),
            None => LocationUpdate::Unavailable,
        })
    }
}
