//! Ripple Counter Walkthrough
//!
//! This example drives a simulator session through every counting mode
//! and prints the state after each pulse.
//!
//! Key concepts:
//! - Pure pulse computation behind a mutable session
//! - Mode changes always reset the counter
//! - Lab mode overriding J/K of the clock-driven stage
//! - Timing trace growing by two samples per pulse
//!
//! Run with: cargo run --example ripple_counter

use ripple::core::{CounterMode, Direction, JkInputs, Signal, Stage};
use ripple::shell::Simulator;

fn run(sim: &mut Simulator, pulses: usize) {
    for _ in 0..pulses {
        let report = sim.clock_pulse().expect("trace time always advances");
        let toggled: Vec<String> = report
            .result
            .toggled
            .iter()
            .map(|stage| stage.to_string())
            .collect();
        println!(
            "  clock {:>2}: {} = {:>2}  toggled [{}]{}",
            sim.clock_count(),
            sim.state(),
            sim.decimal_value(),
            toggled.join(", "),
            if report.result.cleared { "  (decade clear)" } else { "" }
        );
    }
}

fn main() {
    println!("=== 4-bit Asynchronous Ripple Counter ===\n");

    let mut sim = Simulator::default();

    for mode in CounterMode::ALL {
        sim.set_mode(mode);
        println!("{mode}:");
        run(&mut sim, 12);
        println!();
    }

    println!("MOD16_UP_DOWN, switching direction mid-count:");
    sim.set_mode(CounterMode::Mod16UpDown);
    run(&mut sim, 3);
    sim.set_direction(Direction::Down);
    run(&mut sim, 5);
    println!();

    println!("Lab mode, J=0 K=1 on Q_A:");
    sim.set_mode(CounterMode::Mod16Up);
    run(&mut sim, 3);
    sim.set_lab_mode(true);
    sim.set_lab_inputs(JkInputs::new(false, true))
        .expect("lab mode is enabled");
    run(&mut sim, 2);
    println!();

    println!("Timing diagram ({} samples):", sim.trace().len());
    for signal in Signal::ALL.iter().rev() {
        let wave: String = sim
            .trace()
            .column(*signal)
            .iter()
            .map(|(_, level)| if *level == 1 { '#' } else { '_' })
            .collect();
        println!("  {:>4} {}", signal.name(), wave);
    }

    println!("\nHighlighted after last pulse: {:?}", sim.highlighted());
    println!("Q_A lit: {}", sim.highlighted().contains(&Stage::A));

    println!("\n=== Example Complete ===");
}
