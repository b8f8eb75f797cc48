//! In-memory actuator for tests and demos.

use crate::error::Result;

use super::actuator::Actuator;

/// Deterministic actuator with no hardware behind it.
///
/// In unit-step mode ([`SimulatedActuator::new`]) every `advance()` with a
/// nonzero rate moves exactly one step in the rate's direction. In timed mode
/// ([`SimulatedActuator::timed`]) each `advance()` represents a fixed slice of
/// time and emits a step once the rate has accumulated a whole one. At most
/// one step is emitted per call; whole steps beyond that are discarded, so a
/// rate above `1 / tick_period` saturates instead of building a backlog.
#[derive(Debug, Clone, Default)]
pub struct SimulatedActuator {
    position: i64,
    rate: f32,
    enabled: bool,
    tick_period: Option<f32>,
    pending: f32,
    advances: u64,
}

impl SimulatedActuator {
    /// Create a unit-step actuator at position zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timed actuator where each advance covers `tick_period` seconds.
    pub fn timed(tick_period: f32) -> Self {
        Self {
            tick_period: Some(tick_period),
            ..Self::default()
        }
    }

    /// Create a unit-step actuator at a given position.
    pub fn at(position: i64) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Last rate set.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Whether the drive is energized.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of times `advance()` has been called.
    pub fn advances(&self) -> u64 {
        self.advances
    }
}

impl Actuator for SimulatedActuator {
    fn set_rate(&mut self, steps_per_sec: f32) {
        self.rate = steps_per_sec;
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, steps: i64) {
        self.position = steps;
        self.pending = 0.0;
    }

    fn enable(&mut self) -> Result<()> {
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        self.enabled = false;
        Ok(())
    }

    fn advance(&mut self) -> Result<bool> {
        self.advances += 1;

        if self.rate == 0.0 {
            return Ok(false);
        }

        let step = if self.rate > 0.0 { 1 } else { -1 };

        match self.tick_period {
            None => {
                self.position += step;
                Ok(true)
            }
            Some(period) => {
                self.pending += libm::fabsf(self.rate) * period;
                if self.pending >= 1.0 {
                    // One step per call; travel beyond that is dropped, not owed
                    self.pending = libm::fmodf(self.pending, 1.0);
                    self.position += step;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }
}
