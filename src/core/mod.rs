//! Tick scheduler.
//!
//! `Core` owns the collaborators of a running display and drives the daylight
//! pipeline at the configured cadence:
//!
//! - drain pending [`LocationUpdate`]s without blocking
//! - evaluate the reading for the clock's current instant
//! - hand the reading to the renderer
//! - sleep one tick on the clock
//!
//! The loop ends when the running flag is cleared by a signal or when a
//! simulated clock reaches its end time.

use anyhow::Result;
use chrono::Utc;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc::{Receiver, TryRecvError},
};
use std::time::Duration;

use crate::config::{Config, LocationUpdate};
use crate::daylight::{DaylightReading, evaluate};
use crate::display::Renderer;
use crate::geo::{Coordinate, SolarEphemeris};
use crate::time_source::TimeSource;

/// Parameters for creating a Core instance.
pub struct CoreParams {
    pub config: Config,
    /// Coordinate to start with; `None` starts in the awaiting-location state.
    pub coordinate: Option<Coordinate>,
    pub ephemeris: Box<dyn SolarEphemeris>,
    pub renderer: Box<dyn Renderer>,
    pub clock: Arc<dyn TimeSource>,
    pub running: Arc<AtomicBool>,
    pub location_updates: Option<Receiver<LocationUpdate>>,
    pub debug_enabled: bool,
}

/// Runtime state of the display loop.
pub struct Core {
    coordinate: Option<Coordinate>,
    ephemeris: Box<dyn SolarEphemeris>,
    renderer: Box<dyn Renderer>,
    clock: Arc<dyn TimeSource>,
    running: Arc<AtomicBool>,
    location_updates: Option<Receiver<LocationUpdate>>,
    tick_interval: Duration,
    debug_enabled: bool,
}

impl Core {
    pub fn new(params: CoreParams) -> Self {
        Self {
            coordinate: params.coordinate,
            ephemeris: params.ephemeris,
            renderer: params.renderer,
            clock: params.clock,
            running: params.running,
            location_updates: params.location_updates,
            tick_interval: params.config.tick_interval(),
            debug_enabled: params.debug_enabled,
        }
    }

    /// Coordinate used by the next tick.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// Run until the running flag is cleared or the clock ends.
    ///
    /// The renderer is always given a chance to finish its output, even when a
    /// tick failed.
    pub fn execute(mut self) -> Result<()> {
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Refreshing every {} ms", self.tick_interval.as_millis());
        }

        let result = self.main_loop();
        let finished = self.renderer.finish();
        result.and(finished)
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running.load(Ordering::SeqCst) {
            self.tick()?;

            if self.clock.is_ended() {
                if self.debug_enabled {
                    log_pipe!();
                    log_debug!("Simulated clock reached its end time");
                }
                break;
            }

            self.clock.sleep(self.tick_interval);
        }
        Ok(())
    }

    /// Evaluate and render a single reading.
    pub fn tick(&mut self) -> Result<DaylightReading> {
        self.drain_location_updates();

        let now = self.clock.now().with_timezone(&Utc);
        let reading = evaluate(now, self.coordinate, self.ephemeris.as_ref());
        self.renderer.render(&reading)?;
        Ok(reading)
    }

    fn drain_location_updates(&mut self) {
        let Some(receiver) = &self.location_updates else {
            return;
        };

        loop {
            match receiver.try_recv() {
                Ok(update) => {
                    self.coordinate = update.coordinate();
                    if self.debug_enabled {
                        match self.coordinate {
                            Some(coordinate) => log_debug!("Location updated to {coordinate}"),
                            None => log_debug!("Location removed, awaiting a new one"),
                        }
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Watcher thread is gone; keep the last coordinate
                    self.location_updates = None;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daylight::SolarWindow;
    use crate::geo::solar::MockSolarEphemeris;
    use crate::time_source::{SimulatedTimeSource, parse_datetime};
    use chrono::Duration as ChronoDuration;
    use std::sync::{Mutex, mpsc::channel};

    #[derive(Default)]
    struct Recorded {
        readings: Vec<DaylightReading>,
        finished: bool,
    }

    struct RecordingRenderer(Arc<Mutex<Recorded>>);

    impl Renderer for RecordingRenderer {
        fn render(&mut self, reading: &DaylightReading) -> Result<()> {
            self.0.lock().unwrap().readings.push(reading.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.0.lock().unwrap().finished = true;
            Ok(())
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.apply_defaults();
        config
    }

    fn fast_forward_clock(seconds: i64) -> Arc<dyn TimeSource> {
        let start = parse_datetime("2024-06-21 12:00:00").unwrap();
        Arc::new(SimulatedTimeSource::new(
            start,
            start + ChronoDuration::seconds(seconds),
            0.0,
        ))
    }

    fn centered_ephemeris() -> MockSolarEphemeris {
        let mut ephemeris = MockSolarEphemeris::new();
        ephemeris.expect_solar_window().returning(|now, _| {
            SolarWindow::new(now - ChronoDuration::hours(1), now + ChronoDuration::hours(1))
        });
        ephemeris
    }

    fn build(
        coordinate: Option<Coordinate>,
        ephemeris: MockSolarEphemeris,
        clock: Arc<dyn TimeSource>,
        location_updates: Option<Receiver<LocationUpdate>>,
    ) -> (Core, Arc<Mutex<Recorded>>, Arc<AtomicBool>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let running = Arc::new(AtomicBool::new(true));
        let core = Core::new(CoreParams {
            config: test_config(),
            coordinate,
            ephemeris: Box::new(ephemeris),
            renderer: Box::new(RecordingRenderer(recorded.clone())),
            clock,
            running: running.clone(),
            location_updates,
            debug_enabled: false,
        });
        (core, recorded, running)
    }

    #[test]
    fn test_tick_without_coordinate_skips_ephemeris() {
        let mut ephemeris = MockSolarEphemeris::new();
        ephemeris.expect_solar_window().times(0);

        let (mut core, recorded, _) = build(None, ephemeris, fast_forward_clock(1), None);
        let reading = core.tick().unwrap();

        assert_eq!(reading, DaylightReading::AwaitingLocation);
        assert_eq!(recorded.lock().unwrap().readings.len(), 1);
    }

    #[test]
    fn test_execute_ticks_until_simulation_ends() {
        let coordinate = Coordinate::new(0.0, 0.0).unwrap();
        let (core, recorded, _) = build(
            Some(coordinate),
            centered_ephemeris(),
            fast_forward_clock(1),
            None,
        );

        core.execute().unwrap();

        let recorded = recorded.lock().unwrap();
        // 100 ms cadence over one simulated second, both ends included
        assert_eq!(recorded.readings.len(), 11);
        assert!(recorded.finished);
        for reading in &recorded.readings {
            let snapshot = reading.snapshot().unwrap();
            assert_eq!(snapshot.percentage(), 50.0);
            assert_eq!(snapshot.countdown, "01:00:00");
        }
    }

    #[test]
    fn test_execute_stops_when_running_cleared() {
        let mut ephemeris = MockSolarEphemeris::new();
        ephemeris.expect_solar_window().times(0);

        let (core, recorded, running) = build(None, ephemeris, fast_forward_clock(60), None);
        running.store(false, Ordering::SeqCst);
        core.execute().unwrap();

        let recorded = recorded.lock().unwrap();
        assert!(recorded.readings.is_empty());
        assert!(recorded.finished);
    }

    #[test]
    fn test_location_updates_are_applied_before_evaluating() {
        let (tx, rx) = channel();
        let (mut core, _, _) = build(None, centered_ephemeris(), fast_forward_clock(1), Some(rx));

        assert_eq!(core.tick().unwrap(), DaylightReading::AwaitingLocation);

        let berlin = Coordinate::new(52.52, 13.405).unwrap();
        let tokyo = Coordinate::new(35.6762, 139.6503).unwrap();
        tx.send(LocationUpdate::Available(berlin)).unwrap();
        tx.send(LocationUpdate::Available(tokyo)).unwrap();
        let reading = core.tick().unwrap();
        assert_eq!(reading.snapshot().unwrap().coordinate, tokyo);

        tx.send(LocationUpdate::Unavailable).unwrap();
        assert_eq!(core.tick().unwrap(), DaylightReading::AwaitingLocation);
        assert_eq!(core.coordinate(), None);
    }

    #[test]
    fn test_disconnected_watcher_keeps_coordinate() {
        let (tx, rx) = channel();
        let berlin = Coordinate::new(52.52, 13.405).unwrap();
        let (mut core, _, _) = build(
            Some(berlin),
            centered_ephemeris(),
            fast_forward_clock(1),
            Some(rx),
        );

        drop(tx);
        core.tick().unwrap();
        assert_eq!(core.coordinate(), Some(berlin));
        assert!(core.location_updates.is_none());
    }
}
