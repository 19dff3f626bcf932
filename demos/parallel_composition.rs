//! Parallel Composition
//!
//! This example composes a producer and a consumer into one product machine.
//!
//! Key concepts:
//! - Shared symbols synchronize both machines
//! - Private symbols interleave
//! - Compound states carry both constituents
//!
//! Run with: cargo run --example parallel_composition

use tandem::core::{State, Variables};
use tandem::machine::{FiniteStateMachine, Outcome, Transition};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Parallel Composition ===\n");

    let producer = FiniteStateMachine::new(
        State::new("empty"),
        vec![
            Transition::new("empty", "produce", "full"),
            Transition::new("full", "handoff", "empty"),
        ],
        Variables::new(),
    )?;
    let consumer = FiniteStateMachine::new(
        State::new("waiting"),
        vec![
            Transition::new("waiting", "handoff", "eating"),
            Transition::new("eating", "consume", "waiting"),
        ],
        Variables::new(),
    )?;

    let mut system = producer.compose(&consumer)?;

    println!("Product alphabet: {:?}", system.symbols());
    println!("Product states:");
    for state in system.states() {
        println!("  {state}");
    }
    println!("\nInitial state: {}\n", system.current_state());

    for symbol in ["handoff", "produce", "handoff", "produce", "consume", "handoff"] {
        match system.receive(&symbol)? {
            Outcome::Ignored => println!("  {symbol:<8} blocked in ({})", system.current_state()),
            Outcome::Moved { to } => println!("  {symbol:<8} -> ({to})"),
            Outcome::Deadlocked(deadlock) => println!("  {symbol:<8} stuck in {}", deadlock.state),
        }
    }

    println!("\nKey Characteristics:");
    println!("- 'handoff' needs both machines ready");
    println!("- 'produce' and 'consume' move one side only");

    println!("\n=== Example Complete ===");
    Ok(())
}
