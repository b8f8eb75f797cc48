//! The capability the coordinator needs from each axis driver.

use crate::error::Result;

/// Direction of actuator motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing step count.
    Forward,
    /// Decreasing step count.
    Reverse,
}

impl Direction {
    /// Direction of a signed step rate. Zero counts as forward.
    #[inline]
    pub fn from_rate(rate: f32) -> Self {
        if rate < 0.0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// A constant-velocity step actuator with open-loop position tracking.
///
/// Implementations emit steps at the configured signed rate when
/// [`advance`](Actuator::advance) is polled, counting each one into the
/// tracked position.
pub trait Actuator {
    /// Set the signed step rate in steps per second. Zero stops stepping.
    fn set_rate(&mut self, steps_per_sec: f32);

    /// Current tracked position in steps.
    fn position(&self) -> i64;

    /// Overwrite the tracked position without moving.
    fn set_position(&mut self, steps: i64);

    /// Energize the drive.
    fn enable(&mut self) -> Result<()>;

    /// De-energize the drive, releasing holding torque.
    fn disable(&mut self) -> Result<()>;

    /// Perform one bounded unit of motion at the current rate.
    ///
    /// Returns `true` if a step was emitted.
    fn advance(&mut self) -> Result<bool>;
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn set_rate(&mut self, steps_per_sec: f32) {
        (**self).set_rate(steps_per_sec)
    }

    fn position(&self) -> i64 {
        (**self).position()
    }

    fn set_position(&mut self, steps: i64) {
        (**self).set_position(steps)
    }

    fn enable(&mut self) -> Result<()> {
        (**self).enable()
    }

    fn disable(&mut self) -> Result<()> {
        (**self).disable()
    }

    fn advance(&mut self) -> Result<bool> {
        (**self).advance()
    }
}

/// Monotonic microsecond time source for step scheduling.
pub trait Clock {
    /// Microseconds since an arbitrary fixed epoch.
    fn now_us(&mut self) -> u64;
}
