//! Timed Guard
//!
//! This example drives a timer guard from the runtime clock.
//!
//! Key concepts:
//! - Timers registered by transition actions
//! - A shared machine ticking on a tokio runtime
//! - Autonomous leave once the timer runs out
//!
//! Run with: cargo run --example timed_guard

use std::time::Duration;
use tandem::core::{Comparison, Condition, State, Variables};
use tandem::machine::{FiniteStateMachine, Transition};
use tandem::{MachineConfig, SharedMachine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Timed Guard ===\n");

    let green = State::new("Green").with_guard(Condition::timer("phase", Comparison::Less, 3));
    let yellow = State::new("Yellow").with_guard(Condition::timer("phase", Comparison::Less, 1));

    let machine = FiniteStateMachine::with_config(
        State::new("Red"),
        vec![
            Transition::new("Red", "go", green.clone()).then(|vars| vars.reset_timer("phase")),
            Transition::new(green, "timeout", yellow.clone())
                .then(|vars| vars.reset_timer("phase")),
            Transition::new(yellow, "timeout", "Red"),
        ],
        Variables::new(),
        MachineConfig::default().with_tick_period(Duration::from_millis(200)),
    )?;

    let light = SharedMachine::new(machine)?;
    println!("Initial state: {}", light.current_state());

    light.receive(&"go")?;
    println!("After 'go': {}", light.current_state());

    for _ in 0..6 {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let ticks = light.inspect(|m| m.variables().timer("phase").unwrap_or(0));
        println!("  phase={ticks} state={}", light.current_state());
    }

    println!("\nPath: {}", light.inspect(|m| m.history().get_path().join(" -> ")));

    println!("\n=== Example Complete ===");
    Ok(())
}
