//! Example: a full winding cycle on simulated axes.
//!
//! This example demonstrates how to:
//! - Build the machine from a TOML configuration
//! - Queue commands through the `ControlLoop`
//! - Watch mode transitions as the guide reverses at the spool flanges
//!
//! Run with: `cargo run --example winding_cycle`

use spool_winder::{
    config::units::UnitExt,
    error::Result,
    motion::{Command, ControlLoop},
    parse_config, RunMode, SimulatedActuator, Status, WindingCoordinator,
};

/// Simulated time per poll, in seconds.
const TICK: f32 = 0.001;

const CONFIG: &str = r#"
[mechanics]
steps_per_revolution = 200
leadscrew_pitch_mm = 2.0
spool_width_mm = 14.8

[winding]
winder_speed_rev_per_sec = 2.0
wind_pitch_mm_per_rev = 0.4
hysteresis_mm = 2.0
input_policy = "strict"
"#;

fn print_status(label: &str, status: &Status) {
    println!(
        "  [{label}] mode={} winder={:.2} rev guide={:.2} mm speed={:.2} rev/s pitch={:.2} mm/rev",
        status.mode,
        status.winder_position.value(),
        status.guide_position.value(),
        status.winder_speed.value(),
        status.wind_pitch.value(),
    );
}

fn main() -> Result<()> {
    println!("=== Winding Cycle Example ===\n");

    let config = parse_config(CONFIG)?;
    println!(
        "Spool {} mm wide, leadscrew {} mm/rev, {} steps/rev",
        config.mechanics.spool_width.value(),
        config.mechanics.leadscrew_pitch.value(),
        config.mechanics.steps_per_revolution,
    );

    let coordinator = WindingCoordinator::from_config(
        SimulatedActuator::timed(TICK),
        SimulatedActuator::timed(TICK),
        &config,
    )?;
    let mut control = ControlLoop::new(coordinator);
    print_status("start", &control.coordinator().status());

    // Park the guide against the lower flange, then wind 60 turns
    println!("\nPositioning guide...");
    control.submit(Command::SetGuidePosition(3.0f32.mm()))?;
    control.submit(Command::MoveGuide((-3.0f32).mm()))?;
    run_until_stopped(&mut control)?;

    println!("\nWinding 60 turns...");
    control.submit(Command::Wind(60.0f32.revs()))?;
    run_until_stopped(&mut control)?;

    // A rejected setting leaves the previous value in place
    control.submit(Command::SetWindPitch(0.0f32.mm_per_rev()))?;
    if let Err(e) = control.poll() {
        println!("\nRejected: {e}");
    }

    control.submit(Command::Halt)?;
    control.poll()?;
    print_status("end", &control.coordinator().status());

    println!("\n=== Example Complete ===");
    Ok(())
}

/// Poll until the machine stops, printing every transition.
fn run_until_stopped(control: &mut ControlLoop<SimulatedActuator, SimulatedActuator>) -> Result<()> {
    let mut polls: u64 = 0;

    loop {
        if let Some(event) = control.poll()? {
            println!("  t={:>7.3}s {event}", polls as f32 * TICK);
            print_status("now", &control.coordinator().status());
        }
        polls += 1;

        if control.coordinator().mode() == RunMode::Stopped && control.pending() == 0 {
            return Ok(());
        }
    }
}
