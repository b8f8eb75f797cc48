//! Integration tests for spool-winder.
//!
//! These drive the coordinator end to end with simulated actuators.

use spool_winder::config::units::UnitExt;
use spool_winder::config::InputPolicy;
use spool_winder::error::{ConfigError, Error};
use spool_winder::motion::LimitSide;
use spool_winder::{
    Actuator, MachineConfig, ModeEvent, RunMode, SimulatedActuator, WindingCoordinator,
};

type Sim = WindingCoordinator<SimulatedActuator, SimulatedActuator>;

fn machine() -> Sim {
    WindingCoordinator::new(SimulatedActuator::new(), SimulatedActuator::new())
}

/// Tick until the mode leaves `mode`, collecting events. Bounded to catch runaways.
fn run_while(c: &mut Sim, mode: RunMode, max_ticks: usize) -> Vec<ModeEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        if c.mode() != mode {
            return events;
        }
        if let Some(event) = c.tick().unwrap() {
            events.push(event);
        }
    }
    panic!("still in {} after {} ticks", mode, max_ticks);
}

// =============================================================================
// Default configuration
// =============================================================================

#[test]
fn default_limits() {
    let c = machine();

    // (14.8 + 2.0) mm × 200 steps / 2.0 mm
    assert_eq!(c.limits().lower, 0.0);
    assert!((c.limits().upper - 1680.0).abs() < 1e-3);
    assert!((c.hysteresis().value() - 2.0).abs() < 1e-5);
}

#[test]
fn from_config_rejects_bad_mechanics() {
    let mut config = MachineConfig::default();
    config.mechanics.steps_per_revolution = 0;

    let result = WindingCoordinator::from_config(
        SimulatedActuator::new(),
        SimulatedActuator::new(),
        &config,
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    ));
}

// =============================================================================
// Command translation
// =============================================================================

#[test]
fn wind_re_zeroes_winder() {
    let mut c = machine();
    assert!((c.winder_speed().value() - 0.3).abs() < 1e-6);

    c.wind(5.0f32.revs()).unwrap();

    assert_eq!(c.winder().position(), -1000);
    assert_eq!(c.mode(), RunMode::Winding);
    assert!(c.winder_rate().value() > 0.0);
    assert!(c.winder().is_enabled());
    assert!(c.guide().is_enabled());
}

#[test]
fn unwind_counts_down_to_zero() {
    let mut c = machine();
    c.move_winder((-1.0f32).revs()).unwrap();

    assert_eq!(c.winder().position(), 200);
    assert!(c.winder_rate().value() < 0.0);

    let events = run_while(&mut c, RunMode::Winder, 1_000);
    assert_eq!(events, vec![ModeEvent::WinderMoveComplete]);
    assert_eq!(c.winder().position(), 0);
}

#[test]
fn move_guide_sets_target_and_direction() {
    let mut c = machine();
    c.set_guide_position(5.0f32.mm());
    assert_eq!(c.guide().position(), 500);

    c.move_guide((-3.0f32).mm()).unwrap();

    assert_eq!(c.mode(), RunMode::Guide);
    assert!(c.guide_rate().value() < 0.0);
    assert!((c.guide_target().unwrap().value() - 2.0).abs() < 1e-5);
    assert!(!c.winder().is_enabled());

    run_while(&mut c, RunMode::Guide, 1_000);
    assert_eq!(c.guide().position(), 200);
}

#[test]
fn halt_twice_is_same_as_once() {
    let mut c = machine();
    c.wind(3.0f32.revs()).unwrap();
    c.tick().unwrap();

    c.halt().unwrap();
    let once = c.status();
    c.halt().unwrap();
    let twice = c.status();

    assert_eq!(once, twice);
    assert_eq!(twice.mode, RunMode::Stopped);
    assert!(!twice.winder_enabled && !twice.guide_enabled);
    assert!(!c.winder().is_enabled() && !c.guide().is_enabled());
}

#[test]
fn pause_keeps_torque_and_wind_zero_resumes() {
    let mut c = machine();
    c.wind(1.0f32.revs()).unwrap();
    for _ in 0..40 {
        c.tick().unwrap();
    }

    c.pause();
    let winder_at = c.winder().position();
    c.tick().unwrap();
    assert_eq!(c.winder().position(), winder_at);
    assert!(c.winder().is_enabled());

    c.wind(0.0f32.revs()).unwrap();
    run_while(&mut c, RunMode::Winding, 1_000);
    assert_eq!(c.winder().position(), 0);
    // 40 + 160 steps of travel, and no extra winder steps
    assert_eq!(c.winder().advances(), 200);
}

#[test]
fn commands_preempt_motion() {
    let mut c = machine();
    c.wind(10.0f32.revs()).unwrap();
    c.tick().unwrap();

    c.move_guide(1.0f32.mm()).unwrap();
    c.tick().unwrap();

    assert_eq!(c.mode(), RunMode::Guide);
    assert_eq!(c.winder().advances(), 1);
}

// =============================================================================
// Reversal and hysteresis
// =============================================================================

#[test]
fn reversal_on_next_tick_at_upper_limit() {
    let mut c = machine();
    c.set_guide_position(17.0f32.mm());
    c.wind(5.0f32.revs()).unwrap();
    assert!(c.guide_rate().value() > 0.0);

    let event = c.tick().unwrap();

    assert_eq!(event, Some(ModeEvent::GuideReversed { at: LimitSide::Upper }));
    assert_eq!(c.mode(), RunMode::Reversing);
    assert!(c.guide_rate().value() < 0.0);
}

#[test]
fn reversal_at_lower_limit() {
    let mut c = machine();
    c.set_guide_direction(-1);
    c.wind(5.0f32.revs()).unwrap();

    assert_eq!(
        c.tick().unwrap(),
        Some(ModeEvent::GuideReversed { at: LimitSide::Lower })
    );
    assert!(c.guide_rate().value() > 0.0);
    // Compensation travel has begun
    assert_eq!(c.guide().position(), 1);
}

#[test]
fn hysteresis_exit_exactly_at_compensated_position() {
    let mut c = machine();
    c.set_guide_position(16.8f32.mm());
    c.wind(5.0f32.revs()).unwrap();
    c.tick().unwrap();
    assert_eq!(c.mode(), RunMode::Reversing);

    let exit_at = c.limits().upper - c.limits().hysteresis;
    loop {
        let before = c.guide().position();
        let event = c.tick().unwrap();

        if event == Some(ModeEvent::HysteresisComplete) {
            assert_eq!(before as f32, exit_at);
            assert_eq!(c.mode(), RunMode::Winding);
            break;
        }

        assert!(before as f32 > exit_at, "left Reversing late at {}", before);
        assert_eq!(c.mode(), RunMode::Reversing);
    }
}

#[test]
fn no_same_tick_double_hop_with_zero_hysteresis() {
    let mut c = machine();
    c.set_hysteresis(0.0f32.mm()).unwrap();
    c.set_guide_position(14.8f32.mm());
    c.wind(5.0f32.revs()).unwrap();

    assert!(matches!(c.tick().unwrap(), Some(ModeEvent::GuideReversed { .. })));
    assert_eq!(c.mode(), RunMode::Reversing);

    assert_eq!(c.tick().unwrap(), Some(ModeEvent::HysteresisComplete));
    assert_eq!(c.mode(), RunMode::Winding);
}

#[test]
fn full_winding_cycle() {
    let mut c = machine();
    c.wind(20.0f32.revs()).unwrap();

    let mut events = Vec::new();
    for _ in 0..10_000 {
        let mode_before = c.mode();
        let winder_before = c.winder().position();

        let event = c.tick().unwrap();
        if mode_before == RunMode::Reversing && event.is_none() {
            assert_eq!(c.winder().position(), winder_before, "winder moved while reversing");
        }
        events.extend(event);

        if c.mode() == RunMode::Stopped {
            break;
        }
    }

    assert_eq!(
        events,
        vec![
            ModeEvent::GuideReversed { at: LimitSide::Upper },
            ModeEvent::HysteresisComplete,
            ModeEvent::GuideReversed { at: LimitSide::Lower },
            ModeEvent::HysteresisComplete,
            ModeEvent::WindComplete,
        ]
    );
    assert_eq!(c.winder().position(), 0);
    assert_eq!(c.winder().advances(), 4_000);
    assert!(c.guide_rate().value() > 0.0);
}

#[test]
fn timed_winding_follows_pitch() {
    let mut c = WindingCoordinator::new(
        SimulatedActuator::timed(0.001),
        SimulatedActuator::timed(0.001),
    );
    c.wind(1.0f32.revs()).unwrap();

    run_while(&mut c, RunMode::Winding, 10_000);

    // 1 rev at 0.4 mm/rev
    assert!((c.guide_position().value() - 0.4).abs() < 0.025);
    assert_eq!(c.winder().position(), 0);
}

// =============================================================================
// Input policy
// =============================================================================

#[test]
fn permissive_accepts_nonsense() {
    let mut c = machine();

    c.set_hysteresis(20.0f32.mm()).unwrap();
    c.set_wind_pitch(0.0f32.mm_per_rev()).unwrap();

    assert!((c.limits().span() - 3480.0).abs() < 1e-2);
    assert_eq!(c.guide_rate().magnitude(), 0.0);
}

#[test]
fn strict_rejects_and_keeps_previous_value() {
    let mut config = MachineConfig::default();
    config.winding.input_policy = InputPolicy::Strict;
    let mut c = WindingCoordinator::from_config(
        SimulatedActuator::new(),
        SimulatedActuator::new(),
        &config,
    )
    .unwrap();

    assert!(matches!(
        c.set_hysteresis(14.8f32.mm()),
        Err(Error::Config(ConfigError::HysteresisExceedsSpoolWidth { .. }))
    ));
    assert!(matches!(
        c.set_hysteresis((-0.5f32).mm()),
        Err(Error::Config(ConfigError::NegativeHysteresis(_)))
    ));
    assert!(matches!(
        c.set_wind_pitch(0.0f32.mm_per_rev()),
        Err(Error::Config(ConfigError::InvalidWindPitch(_)))
    ));

    assert!((c.hysteresis().value() - 2.0).abs() < 1e-5);
    assert!((c.wind_pitch().value() - 0.4).abs() < 1e-5);

    c.set_hysteresis(1.5f32.mm()).unwrap();
    assert!((c.limits().upper - 1630.0).abs() < 1e-2);
}
