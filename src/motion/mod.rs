//! Motion module for spool-winder.
//!
//! Provides the run-mode state machine, the winder/guide coordinator and the
//! command loop that feeds it.

mod command;
mod control;
mod coordinator;
mod mode;

pub use command::Command;
pub use control::{ControlLoop, COMMAND_QUEUE_DEPTH};
pub use coordinator::{Status, WindingCoordinator};
pub use mode::{LimitSide, ModeEvent, RunMode};
