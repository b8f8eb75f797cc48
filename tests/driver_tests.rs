//! Pin-level tests for the STEP/DIR/EN driver.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};

use spool_winder::config::units::UnitExt;
use spool_winder::error::{ConfigError, Error, MotorError};
use spool_winder::{
    Actuator, Clock, ModeEvent, RunMode, StepperDriver, StepperDriverBuilder, WindingCoordinator,
};

/// Manually advanced microsecond clock, shareable between drivers.
#[derive(Clone, Default)]
struct TestClock(Rc<Cell<u64>>);

impl TestClock {
    fn set(&self, us: u64) {
        self.0.set(us);
    }

    fn advance(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

impl Clock for TestClock {
    fn now_us(&mut self) -> u64 {
        self.0.get()
    }
}

/// Counts rising edges.
#[derive(Clone, Default)]
struct CountingPin(Rc<Cell<u32>>);

impl CountingPin {
    fn pulses(&self) -> u32 {
        self.0.get()
    }
}

impl ErrorType for CountingPin {
    type Error = Infallible;
}

impl OutputPin for CountingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

/// Fails every write.
struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

type MockDriver = StepperDriver<PinMock, PinMock, PinMock, NoopDelay, TestClock>;

fn mock_driver(
    step: &[PinTransaction],
    dir: &[PinTransaction],
    en: &[PinTransaction],
    clock: &TestClock,
) -> MockDriver {
    StepperDriverBuilder::new()
        .name("test")
        .step_pin(PinMock::new(step))
        .dir_pin(PinMock::new(dir))
        .enable_pin(PinMock::new(en))
        .delay(NoopDelay::new())
        .clock(clock.clone())
        .build()
        .unwrap()
}

fn finish(driver: MockDriver) {
    let (mut step, mut dir, mut en, _, _) = driver.release();
    step.done();
    dir.done();
    en.done();
}

fn pulse() -> [PinTransaction; 2] {
    [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]
}

#[test]
fn enable_is_active_low_by_default() {
    let clock = TestClock::default();
    let mut driver = mock_driver(
        &[],
        &[],
        &[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ],
        &clock,
    );

    driver.enable().unwrap();
    assert!(driver.is_enabled());
    driver.disable().unwrap();
    assert!(!driver.is_enabled());
    assert_eq!(driver.name(), "test");

    finish(driver);
}

#[test]
fn enable_active_high() {
    let clock = TestClock::default();
    let mut driver: MockDriver = StepperDriverBuilder::new()
        .step_pin(PinMock::new(&[]))
        .dir_pin(PinMock::new(&[]))
        .enable_pin(PinMock::new(&[PinTransaction::set(PinState::High)]))
        .delay(NoopDelay::new())
        .clock(clock.clone())
        .enable_active_low(false)
        .build()
        .unwrap();

    driver.enable().unwrap();
    assert_eq!(driver.name(), "axis");

    finish(driver);
}

#[test]
fn steps_are_scheduled_by_rate() {
    let clock = TestClock::default();
    let step: Vec<_> = pulse().into_iter().cycle().take(6).collect();
    let mut driver = mock_driver(
        &step,
        &[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ],
        &[],
        &clock,
    );

    driver.set_rate(1000.0);
    assert_eq!(driver.step_interval_us(), 1000);

    // First step is due immediately
    assert!(driver.advance().unwrap());
    clock.set(500);
    assert!(!driver.advance().unwrap());
    clock.set(1000);
    assert!(driver.advance().unwrap());
    assert_eq!(driver.position(), 2);

    driver.set_rate(-1000.0);
    clock.set(2000);
    assert!(driver.advance().unwrap());
    assert_eq!(driver.position(), 1);

    finish(driver);
}

#[test]
fn zero_rate_touches_no_pins() {
    let clock = TestClock::default();
    let mut driver = mock_driver(&[], &[], &[], &clock);

    driver.set_rate(0.0);
    for t in 0..5 {
        clock.set(t * 1_000_000);
        assert!(!driver.advance().unwrap());
    }
    assert_eq!(driver.position(), 0);

    finish(driver);
}

#[test]
fn inverted_direction_pin() {
    let clock = TestClock::default();
    let mut driver: MockDriver = StepperDriverBuilder::new()
        .step_pin(PinMock::new(&pulse()))
        .dir_pin(PinMock::new(&[PinTransaction::set(PinState::Low)]))
        .enable_pin(PinMock::new(&[]))
        .delay(NoopDelay::new())
        .clock(clock.clone())
        .invert_direction(true)
        .build()
        .unwrap();

    driver.set_rate(200.0);
    assert!(driver.advance().unwrap());
    assert_eq!(driver.position(), 1);

    finish(driver);
}

#[test]
fn set_position_only_moves_the_count() {
    let clock = TestClock::default();
    let mut driver = mock_driver(&[], &[], &[], &clock);

    driver.set_position(-1234);
    assert_eq!(driver.position(), -1234);

    finish(driver);
}

#[test]
fn missing_pin_is_reported() {
    let result = StepperDriverBuilder::<PinMock, PinMock, PinMock, NoopDelay, TestClock>::new()
        .name("winder")
        .build();

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField("step_pin")))
    ));
}

#[test]
fn missing_clock_is_reported() {
    let result = StepperDriverBuilder::new()
        .step_pin(CountingPin::default())
        .dir_pin(CountingPin::default())
        .enable_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .build()
        .map(|_: StepperDriver<_, _, _, _, TestClock>| ());

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField("clock")))
    ));
}

#[test]
fn pin_failure_surfaces_from_wind() {
    let winder = StepperDriverBuilder::new()
        .step_pin(CountingPin::default())
        .dir_pin(CountingPin::default())
        .enable_pin(BrokenPin)
        .delay(NoopDelay::new())
        .clock(TestClock::default())
        .build()
        .unwrap();
    let guide = StepperDriverBuilder::new()
        .step_pin(CountingPin::default())
        .dir_pin(CountingPin::default())
        .enable_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .clock(TestClock::default())
        .build()
        .unwrap();

    let mut machine = WindingCoordinator::new(winder, guide);

    assert!(matches!(
        machine.wind(1.0f32.revs()),
        Err(Error::Motor(MotorError::PinError))
    ));
}

#[test]
fn coordinated_drivers_follow_the_clock() {
    let clock = TestClock::default();
    let winder_step = CountingPin::default();
    let guide_step = CountingPin::default();

    let winder = StepperDriverBuilder::new()
        .name("winder")
        .step_pin(winder_step.clone())
        .dir_pin(CountingPin::default())
        .enable_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .clock(clock.clone())
        .build()
        .unwrap();
    let guide = StepperDriverBuilder::new()
        .name("guide")
        .step_pin(guide_step.clone())
        .dir_pin(CountingPin::default())
        .enable_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .clock(clock.clone())
        .build()
        .unwrap();

    let mut machine = WindingCoordinator::new(winder, guide);
    // 10 winder steps at 60 steps/s; the guide runs at 12 steps/s
    machine.wind(0.05f32.revs()).unwrap();

    let mut last = None;
    for _ in 0..100 {
        if machine.mode() == RunMode::Stopped {
            break;
        }
        if let Some(event) = machine.tick().unwrap() {
            last = Some(event);
        }
        clock.advance(20_000);
    }

    assert_eq!(last, Some(ModeEvent::WindComplete));
    assert_eq!(winder_step.pulses(), 10);
    assert_eq!(guide_step.pulses(), 2);

    let (winder, guide) = machine.release();
    assert_eq!(winder.position(), 0);
    assert_eq!(guide.position(), 2);
}
