//! Time source abstraction for supporting both real-time and simulated time.
//!
//! The tick scheduler never calls `Local::now()` directly. It asks a
//! [`TimeSource`], which lets `daywatch simulate` replay a whole day in seconds
//! and lets tests step the clock deterministically.

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, TimeZone};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};
use std::time::{Duration as StdDuration, Instant as StdInstant};

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Sleep for the specified duration (or simulate it)
    fn sleep(&self, duration: StdDuration);

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;

    /// Check if simulation has ended (always false for real time)
    fn is_ended(&self) -> bool {
        false
    }
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated clock running from `start_time` to `end_time`.
///
/// Two modes:
/// - Linear acceleration: simulated time flows at `multiplier` times real time
/// - Fast-forward (`multiplier == 0.0`): each `sleep` jumps the clock forward by
///   exactly the requested duration and returns almost immediately
pub struct SimulatedTimeSource {
    start_time: DateTime<Local>,
    end_time: DateTime<Local>,
    time_multiplier: f64,
    /// Real instant the simulation started, used in linear mode
    started_at: StdInstant,
    /// Current simulated time in fast-forward mode
    fast_forward_current: Mutex<DateTime<Local>>,
}

impl SimulatedTimeSource {
    /// Create a new simulated time source.
    ///
    /// # Arguments
    /// * `start_time` - Starting time for the simulation
    /// * `end_time` - Ending time for the simulation
    /// * `multiplier` - Time acceleration (e.g., 60.0 = 1 simulated minute per real second).
    ///   0.0 means fast-forward mode, negative values fall back to 3600x
    pub fn new(start_time: DateTime<Local>, end_time: DateTime<Local>, multiplier: f64) -> Self {
        let time_multiplier = if multiplier == 0.0 {
            0.0
        } else if multiplier < 0.0 || !multiplier.is_finite() {
            crate::common::constants::DEFAULT_SIMULATION_MULTIPLIER
        } else {
            multiplier
        };

        Self {
            start_time,
            end_time,
            time_multiplier,
            started_at: StdInstant::now(),
            fast_forward_current: Mutex::new(start_time),
        }
    }

    pub fn is_fast_forward(&self) -> bool {
        self.time_multiplier == 0.0
    }

    pub fn multiplier(&self) -> f64 {
        self.time_multiplier
    }

    fn current_time(&self) -> DateTime<Local> {
        if self.is_fast_forward() {
            return match self.fast_forward_current.lock() {
                Ok(guard) => *guard,
                Err(poisoned) => *poisoned.into_inner(),
            };
        }

        let span_ms = (self.end_time - self.start_time).num_milliseconds().max(0);
        let real_elapsed = self.started_at.elapsed().as_secs_f64();
        // Float to int casts saturate, so this stays within the span
        let simulated_ms = ((real_elapsed * self.time_multiplier * 1000.0) as i64).min(span_ms);
        self.start_time + ChronoDuration::milliseconds(simulated_ms)
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.current_time()
    }

    fn sleep(&self, duration: StdDuration) {
        if self.is_fast_forward() {
            let step = ChronoDuration::milliseconds(duration.as_millis() as i64);
            let mut guard = match self.fast_forward_current.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard = (*guard + step).min(self.end_time);
            drop(guard);
            // Give other threads (signals, watcher) a chance to run
            std::thread::sleep(StdDuration::from_millis(1));
            return;
        }

        // Never sleep past the end of the simulation
        let remaining = self.end_time - self.current_time();
        let remaining_secs = remaining.num_milliseconds().max(0) as f64 / 1000.0;
        let simulated_secs = duration.as_secs_f64().min(remaining_secs);
        let real_secs = simulated_secs / self.time_multiplier;
        if real_secs > 0.0 {
            std::thread::sleep(StdDuration::from_secs_f64(real_secs));
        }
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn is_ended(&self) -> bool {
        self.current_time() >= self.end_time
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Shared handle to the global time source
pub fn current() -> Arc<dyn TimeSource> {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .clone()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Local> {
    current().now()
}

/// Check if we're running in simulation mode
pub fn is_simulated() -> bool {
    current().is_simulated()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" as host-local time
pub fn parse_datetime(s: &str) -> Result<DateTime<Local>, String> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| "Ambiguous or invalid local time".to_string())
}
