//! Fixed mechanical constants and the unit conversions derived from them.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

use super::units::{Millimeters, Revolutions, RevolutionsPerSec, StepsPerSec};

/// Mechanical parameters of the machine.
///
/// Both axes share the same steps-per-revolution. These are fixed at
/// construction and used only for unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MechanicalConstants {
    /// Steps per revolution of either actuator (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Guide travel per revolution of its drive screw.
    #[serde(rename = "leadscrew_pitch_mm")]
    pub leadscrew_pitch: Millimeters,

    /// Usable spool width between the flanges.
    #[serde(rename = "spool_width_mm")]
    pub spool_width: Millimeters,
}

impl MechanicalConstants {
    /// 200 steps/rev, 2.0 mm leadscrew, 14.8 mm spool.
    pub const DEFAULT: Self = Self {
        steps_per_revolution: 200,
        leadscrew_pitch: Millimeters(2.0),
        spool_width: Millimeters(14.8),
    };

    /// Check that every constant can be used as a divisor.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid constant.
    pub fn validate(&self) -> Result<()> {
        if self.steps_per_revolution == 0 {
            return Err(ConfigError::InvalidStepsPerRevolution(self.steps_per_revolution).into());
        }

        let pitch = self.leadscrew_pitch.0;
        if !pitch.is_finite() || pitch <= 0.0 {
            return Err(ConfigError::InvalidLeadscrewPitch(pitch).into());
        }

        let width = self.spool_width.0;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::InvalidSpoolWidth(width).into());
        }

        Ok(())
    }

    /// Guide steps per millimeter of travel.
    #[inline]
    pub fn steps_per_mm(&self) -> f32 {
        self.steps_per_revolution as f32 / self.leadscrew_pitch.0
    }

    /// Convert guide travel to (fractional) steps.
    #[inline]
    pub fn mm_to_steps(&self, mm: Millimeters) -> f32 {
        mm.0 * self.steps_per_revolution as f32 / self.leadscrew_pitch.0
    }

    /// Convert guide steps to millimeters.
    #[inline]
    pub fn steps_to_mm(&self, steps: f32) -> Millimeters {
        Millimeters(steps * self.leadscrew_pitch.0 / self.steps_per_revolution as f32)
    }

    /// Convert winder turns to (fractional) steps.
    #[inline]
    pub fn revs_to_steps(&self, revs: Revolutions) -> f32 {
        revs.0 * self.steps_per_revolution as f32
    }

    /// Convert winder steps to revolutions.
    #[inline]
    pub fn steps_to_revs(&self, steps: f32) -> Revolutions {
        Revolutions(steps / self.steps_per_revolution as f32)
    }

    /// Convert a shaft speed to a step rate.
    #[inline]
    pub fn revs_per_sec_to_rate(&self, speed: RevolutionsPerSec) -> StepsPerSec {
        StepsPerSec(speed.0 * self.steps_per_revolution as f32)
    }

    /// Convert a step rate to a shaft speed.
    #[inline]
    pub fn rate_to_revs_per_sec(&self, rate: StepsPerSec) -> RevolutionsPerSec {
        RevolutionsPerSec(rate.0 / self.steps_per_revolution as f32)
    }

    /// Spool width in guide steps.
    #[inline]
    pub fn spool_width_steps(&self) -> f32 {
        self.mm_to_steps(self.spool_width)
    }
}

impl Default for MechanicalConstants {
    fn default() -> Self {
        Self::DEFAULT
    }
}
