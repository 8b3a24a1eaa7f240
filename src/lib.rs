//! # Daywatch Library
//!
//! Internal library for the daywatch binary.
//!
//! This library exists to enable testing of the internals and to keep CLI
//! dispatch (main.rs) apart from application logic.
//!
//! ## Architecture
//!
//! - **Pure core**: `daylight` holds the duration utility, the progress
//!   calculator, the countdown formatter and the per-tick pipeline
//! - **Geographic**: `geo` validates coordinates and computes solar windows
//! - **Tick scheduler**: `core` drives the pipeline at a fixed cadence
//! - **Rendering**: `display` with terminal, log and JSON surfaces
//! - **Entry point**: `Daywatch` builds and runs the live display
//! - **Infrastructure**: configuration with hot reload, signals, simulated
//!   time, logging and shared utilities

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod daylight;
pub mod display;
pub mod geo;
pub mod signals;
pub mod time_source;

mod daywatch;

pub use daywatch::Daywatch;
