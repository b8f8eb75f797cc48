//! Motor module for spool-winder.
//!
//! Provides the actuator capability trait, a STEP/DIR/EN hardware driver and
//! a simulated actuator.

mod actuator;
mod builder;
mod driver;
mod simulated;

pub use actuator::{Actuator, Clock, Direction};
pub use builder::{StepperDriverBuilder, DEFAULT_PULSE_WIDTH_US};
pub use driver::StepperDriver;
pub use simulated::SimulatedActuator;
