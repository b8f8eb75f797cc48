//! Configuration module for spool-winder.
//!
//! Provides the mechanical constants, start-up winding settings and guide
//! limit types, loadable from TOML files (with `std` feature) or built in code.

mod limits;
mod mechanical;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;
mod winding;

pub use limits::{GuideLimits, InputPolicy};
pub use mechanical::MechanicalConstants;
pub use system::MachineConfig;
pub use validation::validate_config;
pub use winding::WindingDefaults;

pub(crate) use validation::{check_hysteresis, check_wind_pitch};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millimeters, MillimetersPerRev, Revolutions, RevolutionsPerSec, Steps, StepsPerSec};
