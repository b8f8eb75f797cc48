//! Configuration validation.

use crate::error::{ConfigError, Result};

use super::limits::InputPolicy;
use super::mechanical::MechanicalConstants;
use super::units::{Millimeters, MillimetersPerRev};
use super::MachineConfig;

/// Validate a machine configuration.
///
/// Checks:
/// - Mechanical constants are usable as divisors
/// - Under `InputPolicy::Strict`, the start-up wind pitch and hysteresis pass
///   the same screening as runtime changes
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    config.mechanics.validate()?;

    if config.winding.input_policy == InputPolicy::Strict {
        check_wind_pitch(config.winding.wind_pitch)?;
        check_hysteresis(config.winding.hysteresis, &config.mechanics)?;
    }

    Ok(())
}

/// Wind pitch must be finite and nonzero, otherwise the guide never moves.
pub(crate) fn check_wind_pitch(pitch: MillimetersPerRev) -> Result<()> {
    if !pitch.0.is_finite() || pitch.0 == 0.0 {
        return Err(ConfigError::InvalidWindPitch(pitch.0).into());
    }
    Ok(())
}

/// Hysteresis must lie in `[0, spool_width)`.
pub(crate) fn check_hysteresis(hysteresis: Millimeters, mech: &MechanicalConstants) -> Result<()> {
    if !hysteresis.0.is_finite() {
        return Err(ConfigError::NonFiniteHysteresis(hysteresis.0).into());
    }

    if hysteresis.0 < 0.0 {
        return Err(ConfigError::NegativeHysteresis(hysteresis.0).into());
    }

    if hysteresis.0 >= mech.spool_width.0 {
        return Err(ConfigError::HysteresisExceedsSpoolWidth {
            hysteresis: hysteresis.0,
            spool_width: mech.spool_width.0,
        }
        .into());
    }

    Ok(())
}
