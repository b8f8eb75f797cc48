//! # spool-winder
//!
//! Coordinated winder/guide stepper control for cable winding machines, with
//! embedded-hal 1.0 support.
//!
//! A rotary winder turns the spool while a linear guide traverses back and
//! forth to lay the cable. The guide speed is slaved to the winder speed by
//! the wind pitch; at each end of the spool the guide reverses and travels a
//! hysteresis distance on its own to take up backlash before winding resumes.
//!
//! ## Features
//!
//! - **Tick-driven**: one non-blocking `tick()` per host loop iteration
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/EN, `DelayNs` for pulses
//! - **no_std compatible**: Core library works without standard library
//! - **Hardware-free testing**: any [`Actuator`] can drive either axis
//! - **Configuration-driven**: mechanical constants and start-up settings from TOML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spool_winder::config::units::UnitExt;
//! use spool_winder::{StepperDriverBuilder, WindingCoordinator};
//!
//! let winder = StepperDriverBuilder::new()
//!     .name("winder")
//!     .step_pin(step_a)
//!     .dir_pin(dir_a)
//!     .enable_pin(en_a)
//!     .delay(delay_a)
//!     .clock(clock_a)
//!     .build()?;
//! let guide = /* same for the guide axis */;
//!
//! let mut machine = WindingCoordinator::new(winder, guide);
//! machine.wind(120.0f32.revs())?;
//!
//! loop {
//!     if let Some(event) = machine.tick()? {
//!         // report the transition
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to later modules
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, MachineConfig, MechanicalConstants, WindingDefaults};
pub use error::{Error, Result};
pub use motion::{Command, ControlLoop, ModeEvent, RunMode, Status, WindingCoordinator};
pub use motor::{Actuator, Clock, SimulatedActuator, StepperDriver, StepperDriverBuilder};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{
    Millimeters, MillimetersPerRev, Revolutions, RevolutionsPerSec, Steps, StepsPerSec, UnitExt,
};
