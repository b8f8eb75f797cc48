//! Builder pattern for StepperDriver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{ConfigError, Error, Result};

use super::actuator::Clock;
use super::driver::StepperDriver;

/// Default STEP high time, enough for A4988/DRV8825 class drivers.
pub const DEFAULT_PULSE_WIDTH_US: u32 = 2;

/// Builder for creating StepperDriver instances.
pub struct StepperDriverBuilder<STEP, DIR, EN, DELAY, CLK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    clock: Option<CLK>,
    name: Option<heapless::String<32>>,
    invert_direction: bool,
    enable_active_low: bool,
    pulse_width_us: u32,
}

impl<STEP, DIR, EN, DELAY, CLK> Default for StepperDriverBuilder<STEP, DIR, EN, DELAY, CLK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, DELAY, CLK> StepperDriverBuilder<STEP, DIR, EN, DELAY, CLK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            delay: None,
            clock: None,
            name: None,
            invert_direction: false,
            enable_active_low: true,
            pulse_width_us: DEFAULT_PULSE_WIDTH_US,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the enable pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the step scheduling clock.
    pub fn clock(mut self, clock: CLK) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set enable polarity. Defaults to active-low.
    pub fn enable_active_low(mut self, active_low: bool) -> Self {
        self.enable_active_low = active_low;
        self
    }

    /// Set the STEP pulse width in microseconds.
    pub fn pulse_width_us(mut self, us: u32) -> Self {
        self.pulse_width_us = us;
        self
    }

    /// Build the StepperDriver.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if a pin, the delay or the clock is missing.
    pub fn build(self) -> Result<StepperDriver<STEP, DIR, EN, DELAY, CLK>> {
        let step_pin = self.step_pin.ok_or_else(|| missing("step_pin"))?;
        let dir_pin = self.dir_pin.ok_or_else(|| missing("dir_pin"))?;
        let enable_pin = self.enable_pin.ok_or_else(|| missing("enable_pin"))?;
        let delay = self.delay.ok_or_else(|| missing("delay"))?;
        let clock = self.clock.ok_or_else(|| missing("clock"))?;

        let name = self.name.unwrap_or_else(|| {
            let mut name = heapless::String::new();
            let _ = name.push_str("axis");
            name
        });

        Ok(StepperDriver::new(
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            clock,
            name,
            self.invert_direction,
            self.enable_active_low,
            self.pulse_width_us,
        ))
    }
}

fn missing(field: &'static str) -> Error {
    Error::Config(ConfigError::MissingField(field))
}
