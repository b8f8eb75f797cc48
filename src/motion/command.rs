//! Typed coordinator commands.

use crate::config::units::{Millimeters, MillimetersPerRev, Revolutions, RevolutionsPerSec};

/// One coordinator operation, as produced by a command front end.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Wind turns with the guide traversing; zero resumes.
    Wind(Revolutions),
    /// Turn the winder alone; zero resumes.
    MoveWinder(Revolutions),
    /// Move the guide alone, relative to its position.
    MoveGuide(Millimeters),
    /// Set winder speed.
    SetWinderSpeed(RevolutionsPerSec),
    /// Set guide travel per winder revolution.
    SetWindPitch(MillimetersPerRev),
    /// Set compensation travel after each reversal.
    SetHysteresis(Millimeters),
    /// Overwrite the guide's tracked position.
    SetGuidePosition(Millimeters),
    /// Zero reverses the guide, otherwise the sign selects its direction.
    SetGuideDirection(i32),
    /// Stop and de-energize both drives.
    Halt,
    /// Stop, keeping holding torque.
    Pause,
}
