//! Step/direction/enable stepper driver.
//!
//! Generic over embedded-hal 1.0 pin types and a microsecond [`Clock`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Steps;
use crate::error::{MotorError, Result};

use super::actuator::{Actuator, Clock, Direction};

/// Constant-speed stepper driver for STEP/DIR/EN style driver boards.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: enable pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider for the step pulse width (must implement `DelayNs`)
/// - `CLK`: time source for step scheduling (must implement [`Clock`])
///
/// `advance()` never waits for a step to become due: it checks the clock and
/// returns immediately when the step interval has not yet elapsed.
pub struct StepperDriver<STEP, DIR, EN, DELAY, CLK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = forward, low = reverse, or inverted).
    dir_pin: DIR,

    /// Enable pin.
    enable_pin: EN,

    /// Delay provider for the step pulse.
    delay: DELAY,

    /// Step scheduling time source.
    clock: CLK,

    /// Tracked position.
    position: Steps,

    /// Signed step rate.
    rate: f32,

    /// Microseconds between steps at the current rate.
    interval_us: u64,

    /// Time of the last emitted step.
    last_step_us: Option<u64>,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Axis name for logging/debugging.
    name: heapless::String<32>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Whether the driver is enabled by pulling EN low.
    enable_active_low: bool,

    /// STEP high time in microseconds.
    pulse_width_us: u32,

    /// Whether the drive is energized.
    enabled: bool,
}

impl<STEP, DIR, EN, DELAY, CLK> StepperDriver<STEP, DIR, EN, DELAY, CLK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        enable_pin: EN,
        delay: DELAY,
        clock: CLK,
        name: heapless::String<32>,
        invert_direction: bool,
        enable_active_low: bool,
        pulse_width_us: u32,
    ) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            clock,
            position: Steps::default(),
            rate: 0.0,
            interval_us: 0,
            last_step_us: None,
            current_direction: None,
            name,
            invert_direction,
            enable_active_low,
            pulse_width_us,
            enabled: false,
        }
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get current signed rate in steps per second.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Interval between steps at the current rate, in microseconds.
    #[inline]
    pub fn step_interval_us(&self) -> u64 {
        self.interval_us
    }

    /// Whether the drive is energized.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Give back the pins, delay and clock.
    pub fn release(self) -> (STEP, DIR, EN, DELAY, CLK) {
        (self.step_pin, self.dir_pin, self.enable_pin, self.delay, self.clock)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Forward => !self.invert_direction,
            Direction::Reverse => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    fn write_enable(&mut self, energize: bool) -> Result<()> {
        let pin_high = energize != self.enable_active_low;

        if pin_high {
            self.enable_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.enable_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.enabled = energize;
        Ok(())
    }
}

impl<STEP, DIR, EN, DELAY, CLK> Actuator for StepperDriver<STEP, DIR, EN, DELAY, CLK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    fn set_rate(&mut self, steps_per_sec: f32) {
        self.rate = steps_per_sec;

        let magnitude = libm::fabsf(steps_per_sec);
        self.interval_us = if magnitude > 0.0 {
            (1_000_000.0 / magnitude) as u64
        } else {
            0
        };
    }

    fn position(&self) -> i64 {
        self.position.value()
    }

    fn set_position(&mut self, steps: i64) {
        self.position = Steps(steps);
    }

    fn enable(&mut self) -> Result<()> {
        self.write_enable(true)
    }

    fn disable(&mut self) -> Result<()> {
        self.write_enable(false)
    }

    fn advance(&mut self) -> Result<bool> {
        if self.rate == 0.0 {
            return Ok(false);
        }

        let now = self.clock.now_us();
        if let Some(last) = self.last_step_us {
            if now.wrapping_sub(last) < self.interval_us {
                return Ok(false);
            }
        }

        let direction = Direction::from_rate(self.rate);
        self.set_direction(direction)?;

        // Generate step pulse
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(self.pulse_width_us);
        self.step_pin.set_low().map_err(|_| MotorError::PinError)?;

        self.position = Steps(self.position.value() + direction.sign());
        self.last_step_us = Some(now);

        Ok(true)
    }
}
