//! Winder/guide coordination.
//!
//! [`WindingCoordinator`] owns both actuators, the run mode and the winding
//! settings. Commands set targets, rates and the mode; [`tick`] is polled from
//! the host loop to detect completion and reversal and to step the active
//! axes.
//!
//! Winder targets are encoded as the origin: a move re-zeroes the winder so
//! that its current position is minus the requested distance, and the move is
//! complete once the position crosses zero in the direction of travel.
//!
//! [`tick`]: WindingCoordinator::tick

use crate::config::units::{
    Millimeters, MillimetersPerRev, Revolutions, RevolutionsPerSec, Steps, StepsPerSec,
};
use crate::config::{
    check_hysteresis, check_wind_pitch, validate_config, GuideLimits, InputPolicy,
    MachineConfig, MechanicalConstants,
};
use crate::error::Result;
use crate::motor::Actuator;

use super::command::Command;
use super::mode::{LimitSide, ModeEvent, RunMode};

/// One actuator plus the rate and drive state last commanded to it.
#[derive(Debug)]
struct Axis<A: Actuator> {
    actuator: A,
    rate: StepsPerSec,
    enabled: bool,
}

impl<A: Actuator> Axis<A> {
    fn new(actuator: A) -> Self {
        Self {
            actuator,
            rate: StepsPerSec::default(),
            enabled: false,
        }
    }

    #[inline]
    fn position(&self) -> i64 {
        self.actuator.position()
    }

    fn set_rate(&mut self, rate: StepsPerSec) {
        self.rate = rate;
        self.actuator.set_rate(rate.value());
    }

    fn enable(&mut self) -> Result<()> {
        self.actuator.enable()?;
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        self.actuator.disable()?;
        self.enabled = false;
        Ok(())
    }

    /// `true` once the position is at or past `target` in the direction of travel.
    #[inline]
    fn crossed(&self, target: i64) -> bool {
        let position = self.position();
        (self.rate.value() > 0.0 && position >= target)
            || (self.rate.value() < 0.0 && position <= target)
    }
}

/// Snapshot of the coordinator's observable state, in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    /// Current run mode.
    pub mode: RunMode,
    /// Signed winder speed.
    pub winder_speed: RevolutionsPerSec,
    /// Signed guide leadscrew speed.
    pub guide_speed: RevolutionsPerSec,
    /// Guide travel per winder revolution.
    pub wind_pitch: MillimetersPerRev,
    /// Compensation travel after each reversal.
    pub hysteresis: Millimeters,
    /// Guide position.
    pub guide_position: Millimeters,
    /// Winder position relative to its pending target.
    pub winder_position: Revolutions,
    /// Guide target, while a guide-only move is running.
    pub guide_target: Option<Millimeters>,
    /// Whether the winder drive is energized.
    pub winder_enabled: bool,
    /// Whether the guide drive is energized.
    pub guide_enabled: bool,
}

/// Coordinates a winder and a guide actuator.
///
/// # Example
///
/// ```rust
/// use spool_winder::config::units::UnitExt;
/// use spool_winder::{RunMode, SimulatedActuator, WindingCoordinator};
///
/// let mut winder = WindingCoordinator::new(SimulatedActuator::new(), SimulatedActuator::new());
/// winder.wind(5.0f32.revs()).unwrap();
/// assert_eq!(winder.mode(), RunMode::Winding);
///
/// while winder.mode() != RunMode::Stopped {
///     winder.tick().unwrap();
/// }
/// assert!(winder.winder_position().value().abs() < 1e-6);
/// ```
#[derive(Debug)]
pub struct WindingCoordinator<W: Actuator, G: Actuator> {
    winder: Axis<W>,
    guide: Axis<G>,
    mechanics: MechanicalConstants,
    policy: InputPolicy,
    mode: RunMode,
    /// Guide steps per winder step.
    ratio: f32,
    limits: GuideLimits,
    /// Only meaningful in `RunMode::Guide`.
    guide_target: i64,
}

impl<W: Actuator, G: Actuator> WindingCoordinator<W, G> {
    /// Create a coordinator with the default machine configuration.
    pub fn new(winder: W, guide: G) -> Self {
        Self::build(winder, guide, &MachineConfig::default())
    }

    /// Create a coordinator from a machine configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_config(winder: W, guide: G, config: &MachineConfig) -> Result<Self> {
        validate_config(config)?;
        Ok(Self::build(winder, guide, config))
    }

    fn build(winder: W, guide: G, config: &MachineConfig) -> Self {
        let mechanics = config.mechanics;
        let defaults = config.winding;

        let mut coordinator = Self {
            winder: Axis::new(winder),
            guide: Axis::new(guide),
            mechanics,
            policy: defaults.input_policy,
            mode: RunMode::Stopped,
            ratio: defaults.wind_pitch.value() / mechanics.leadscrew_pitch.value(),
            limits: GuideLimits::new(
                mechanics.mm_to_steps(defaults.hysteresis),
                mechanics.spool_width_steps(),
            ),
            guide_target: 0,
        };

        coordinator
            .winder
            .set_rate(mechanics.revs_per_sec_to_rate(defaults.winder_speed));
        coordinator.update_guide_rate();
        coordinator
    }

    // ---------------------------------------------------------------------
    // Tick
    // ---------------------------------------------------------------------

    /// Evaluate transitions for the current mode, then step the active axes once.
    ///
    /// At most one transition happens per tick. Returns the transition, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if an actuator fails to step.
    pub fn tick(&mut self) -> Result<Option<ModeEvent>> {
        let event = match self.mode {
            RunMode::Stopped => None,
            RunMode::Winder => self
                .winder
                .crossed(0)
                .then_some(ModeEvent::WinderMoveComplete),
            RunMode::Winding => {
                if self.winder.crossed(0) {
                    Some(ModeEvent::WindComplete)
                } else {
                    self.guide_limit_reached()
                        .map(|at| ModeEvent::GuideReversed { at })
                }
            }
            RunMode::Reversing => self
                .limits
                .compensated(self.guide.position(), self.guide.rate.value())
                .then_some(ModeEvent::HysteresisComplete),
            RunMode::Guide => self
                .guide
                .crossed(self.guide_target)
                .then_some(ModeEvent::GuideMoveComplete),
        };

        if let Some(event) = event {
            if let ModeEvent::GuideReversed { .. } = event {
                self.guide.set_rate(self.guide.rate.reversed());
            }
            info!(
                "{} (guide {} steps, winder {} steps)",
                event,
                self.guide.position(),
                self.winder.position()
            );
            self.set_mode(event.next_mode());
        }

        if self.mode.is_guide_active() {
            self.guide.actuator.advance()?;
        }
        if self.mode.is_winder_active() {
            self.winder.actuator.advance()?;
        }

        Ok(event)
    }

    fn guide_limit_reached(&self) -> Option<LimitSide> {
        let rate = self.guide.rate.value();
        if !self.limits.reached(self.guide.position(), rate) {
            return None;
        }

        Some(if rate > 0.0 {
            LimitSide::Upper
        } else {
            LimitSide::Lower
        })
    }

    fn set_mode(&mut self, mode: RunMode) {
        if self.mode != mode {
            debug!("mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    // ---------------------------------------------------------------------
    // Motion commands
    // ---------------------------------------------------------------------

    /// Wind `turns` revolutions with the guide traversing.
    ///
    /// Negative turns unwind. Zero resumes the pending wind with its
    /// remaining distance and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if a drive cannot be enabled.
    pub fn wind(&mut self, turns: Revolutions) -> Result<()> {
        self.retarget_winder(turns);
        self.winder.enable()?;
        self.guide.enable()?;
        self.update_guide_rate();
        self.set_mode(RunMode::Winding);
        Ok(())
    }

    /// Turn the winder alone by `turns` revolutions. Zero resumes.
    ///
    /// # Errors
    ///
    /// Returns an error if the winder drive cannot be enabled.
    pub fn move_winder(&mut self, turns: Revolutions) -> Result<()> {
        self.retarget_winder(turns);
        self.winder.enable()?;
        self.set_mode(RunMode::Winder);
        Ok(())
    }

    /// Move the guide alone by `distance`, relative to its current position.
    ///
    /// # Errors
    ///
    /// Returns an error if the guide drive cannot be enabled.
    pub fn move_guide(&mut self, distance: Millimeters) -> Result<()> {
        let delta = Steps::round(self.mechanics.mm_to_steps(distance));
        self.guide_target = self.guide.position().saturating_add(delta.value());

        let rate = self.guide.rate.magnitude();
        if distance.value() > 0.0 {
            self.guide.set_rate(StepsPerSec(rate));
        } else if distance.value() < 0.0 {
            self.guide.set_rate(StepsPerSec(-rate));
        }

        self.guide.enable()?;
        self.set_mode(RunMode::Guide);
        Ok(())
    }

    /// Stop and de-energize both drives.
    ///
    /// # Errors
    ///
    /// Returns the first drive error; both drives are still attempted.
    pub fn halt(&mut self) -> Result<()> {
        self.set_mode(RunMode::Stopped);
        let winder = self.winder.disable();
        let guide = self.guide.disable();
        winder.and(guide)
    }

    /// Stop without releasing holding torque. `wind(0)` resumes.
    pub fn pause(&mut self) {
        self.set_mode(RunMode::Stopped);
    }

    fn retarget_winder(&mut self, turns: Revolutions) {
        if turns.value() == 0.0 {
            return;
        }

        let distance = Steps::round(self.mechanics.revs_to_steps(turns));
        self.winder.actuator.set_position(distance.value().saturating_neg());

        let magnitude = self.winder.rate.magnitude();
        self.winder
            .set_rate(StepsPerSec(libm::copysignf(magnitude, turns.value())));
    }

    // ---------------------------------------------------------------------
    // Configuration commands
    // ---------------------------------------------------------------------

    /// Set the winder speed. The current winder direction is kept.
    pub fn set_winder_speed(&mut self, speed: RevolutionsPerSec) {
        let rate = self.mechanics.revs_per_sec_to_rate(speed);
        self.winder.set_rate(self.winder.rate.with_magnitude(rate.value()));
        self.update_guide_rate();
    }

    /// Set guide travel per winder revolution.
    ///
    /// # Errors
    ///
    /// Under [`InputPolicy::Strict`], rejects a zero or non-finite pitch and
    /// leaves the setting unchanged.
    pub fn set_wind_pitch(&mut self, pitch: MillimetersPerRev) -> Result<()> {
        if self.policy == InputPolicy::Strict {
            check_wind_pitch(pitch).map_err(|e| {
                warn!("wind pitch {} rejected", pitch.value());
                e
            })?;
        }

        self.ratio = pitch.value() / self.mechanics.leadscrew_pitch.value();
        self.update_guide_rate();
        Ok(())
    }

    /// Set compensation travel after each reversal and move the upper limit accordingly.
    ///
    /// # Errors
    ///
    /// Under [`InputPolicy::Strict`], rejects negative hysteresis or
    /// hysteresis not smaller than the spool width.
    pub fn set_hysteresis(&mut self, hysteresis: Millimeters) -> Result<()> {
        if self.policy == InputPolicy::Strict {
            check_hysteresis(hysteresis, &self.mechanics).map_err(|e| {
                warn!("hysteresis {} rejected", hysteresis.value());
                e
            })?;
        }

        self.limits = GuideLimits::new(
            self.mechanics.mm_to_steps(hysteresis),
            self.mechanics.spool_width_steps(),
        );
        Ok(())
    }

    /// Overwrite the guide's tracked position, e.g. after manual zeroing.
    ///
    /// Do not use while the guide is being driven automatically.
    pub fn set_guide_position(&mut self, position: Millimeters) {
        if self.mode.is_guide_active() {
            warn!("guide position overwritten in mode {}", self.mode);
        }
        let steps = Steps::round(self.mechanics.mm_to_steps(position));
        self.guide.actuator.set_position(steps.value());
    }

    /// Set the guide direction: zero reverses it, otherwise the sign selects it.
    pub fn set_guide_direction(&mut self, sign: i32) {
        let magnitude = self.guide.rate.magnitude();
        let rate = match sign.signum() {
            0 => self.guide.rate.reversed(),
            1 => StepsPerSec(magnitude),
            _ => StepsPerSec(-magnitude),
        };
        self.guide.set_rate(rate);
    }

    /// Run a command to completion.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        debug!("execute {}", command);
        match command {
            Command::Wind(turns) => self.wind(turns),
            Command::MoveWinder(turns) => self.move_winder(turns),
            Command::MoveGuide(distance) => self.move_guide(distance),
            Command::SetWinderSpeed(speed) => {
                self.set_winder_speed(speed);
                Ok(())
            }
            Command::SetWindPitch(pitch) => self.set_wind_pitch(pitch),
            Command::SetHysteresis(hysteresis) => self.set_hysteresis(hysteresis),
            Command::SetGuidePosition(position) => {
                self.set_guide_position(position);
                Ok(())
            }
            Command::SetGuideDirection(sign) => {
                self.set_guide_direction(sign);
                Ok(())
            }
            Command::Halt => self.halt(),
            Command::Pause => {
                self.pause();
                Ok(())
            }
        }
    }

    /// Keep `|guide rate| = |winder rate| × ratio`, preserving the guide's direction.
    fn update_guide_rate(&mut self) {
        let magnitude = self.winder.rate.magnitude() * libm::fabsf(self.ratio);
        self.guide.set_rate(self.guide.rate.with_magnitude(magnitude));
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    /// Current run mode.
    #[inline]
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Signed winder speed.
    pub fn winder_speed(&self) -> RevolutionsPerSec {
        self.mechanics.rate_to_revs_per_sec(self.winder.rate)
    }

    /// Signed guide leadscrew speed.
    pub fn guide_speed(&self) -> RevolutionsPerSec {
        self.mechanics.rate_to_revs_per_sec(self.guide.rate)
    }

    /// Guide travel per winder revolution.
    pub fn wind_pitch(&self) -> MillimetersPerRev {
        MillimetersPerRev(self.ratio * self.mechanics.leadscrew_pitch.value())
    }

    /// Compensation travel after each reversal.
    pub fn hysteresis(&self) -> Millimeters {
        self.mechanics.steps_to_mm(self.limits.hysteresis)
    }

    /// Guide position.
    pub fn guide_position(&self) -> Millimeters {
        self.mechanics.steps_to_mm(self.guide.position() as f32)
    }

    /// Winder position relative to the pending target (negative while winding forward).
    pub fn winder_position(&self) -> Revolutions {
        self.mechanics.steps_to_revs(self.winder.position() as f32)
    }

    /// Guide target of the running guide-only move.
    pub fn guide_target(&self) -> Option<Millimeters> {
        (self.mode == RunMode::Guide).then(|| self.mechanics.steps_to_mm(self.guide_target as f32))
    }

    /// Signed winder rate.
    #[inline]
    pub fn winder_rate(&self) -> StepsPerSec {
        self.winder.rate
    }

    /// Signed guide rate.
    #[inline]
    pub fn guide_rate(&self) -> StepsPerSec {
        self.guide.rate
    }

    /// Current guide traverse limits.
    #[inline]
    pub fn limits(&self) -> GuideLimits {
        self.limits
    }

    /// Mechanical constants in use.
    #[inline]
    pub fn mechanics(&self) -> &MechanicalConstants {
        &self.mechanics
    }

    /// Runtime input screening policy.
    #[inline]
    pub fn input_policy(&self) -> InputPolicy {
        self.policy
    }

    /// The winder actuator.
    #[inline]
    pub fn winder(&self) -> &W {
        &self.winder.actuator
    }

    /// The guide actuator.
    #[inline]
    pub fn guide(&self) -> &G {
        &self.guide.actuator
    }

    /// Snapshot of the observable state.
    pub fn status(&self) -> Status {
        Status {
            mode: self.mode,
            winder_speed: self.winder_speed(),
            guide_speed: self.guide_speed(),
            wind_pitch: self.wind_pitch(),
            hysteresis: self.hysteresis(),
            guide_position: self.guide_position(),
            winder_position: self.winder_position(),
            guide_target: self.guide_target(),
            winder_enabled: self.winder.enabled,
            guide_enabled: self.guide.enabled,
        }
    }

    /// Give back both actuators.
    pub fn release(self) -> (W, G) {
        (self.winder.actuator, self.guide.actuator)
    }
}
