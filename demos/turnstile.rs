//! Coin-Operated Turnstile
//!
//! This example demonstrates input-driven transitions with guards, actions
//! and an autonomous leave.
//!
//! Key concepts:
//! - Guarded transitions tried in table order
//! - Actions that update the variable store
//! - A state guard that forces the machine out of a state
//!
//! Run with: cargo run --example turnstile

use tandem::builder::TransitionBuilder;
use tandem::core::{Comparison, Condition, State};
use tandem::machine::Outcome;
use tandem::MachineBuilder;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Event {
    Coin,
    Push,
    Service,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Turnstile State Machine ===\n");

    // The turnstile stays in service only while the coin box has room.
    let locked = State::new("Locked").with_guard(Condition::variable(
        "coins",
        Comparison::Less,
        3,
    ));
    let unlocked = State::new("Unlocked");

    let mut turnstile = MachineBuilder::new()
        .initial(locked.clone())
        .variable("coins", 0)
        // Listed first so a full coin box leaves through it.
        .transition(
            TransitionBuilder::new()
                .from(locked.clone())
                .on(Event::Service)
                .to("OutOfService"),
        )?
        .transition(
            TransitionBuilder::new()
                .from(locked.clone())
                .on(Event::Coin)
                .to(unlocked.clone())
                .action(|vars| {
                    let coins = vars.int("coins").unwrap_or(0);
                    vars.set("coins", coins + 1);
                }),
        )?
        .transition(
            TransitionBuilder::new()
                .from(unlocked)
                .on(Event::Push)
                .to(locked),
        )?
        .strict()
        .build()?;

    println!("Initial state: {}\n", turnstile.current_state());

    for event in [Event::Push, Event::Coin, Event::Push, Event::Coin, Event::Push] {
        let outcome = turnstile.receive(&event)?;
        match outcome {
            Outcome::Ignored => println!("  {event:?}: ignored"),
            Outcome::Moved { to } => println!("  {event:?}: -> {to}"),
            Outcome::Deadlocked(deadlock) => println!("  {event:?}: stuck in {}", deadlock.state),
        }
    }

    println!("\nThird customer pays:");
    turnstile.receive(&Event::Coin)?;
    turnstile.receive(&Event::Push)?;
    println!("  Coin box full, machine moved itself to: {}", turnstile.current_state());

    println!("\nPath: {}", turnstile.history().get_path().join(" -> "));

    println!("\n=== Example Complete ===");
    Ok(())
}
