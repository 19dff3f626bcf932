//! Tandem: a reactive finite state machine engine
//!
//! Machines move on input symbols, guarded by conditions over a variable
//! store, and react on their own when a state's guard stops holding. Two
//! machines can be composed in parallel into a single product machine.
//!
//! # Core Concepts
//!
//! - **Symbols**: any hashable token drives transitions
//! - **Conditions**: pure predicates over variables and timers
//! - **States**: identities with optional guards; compound states pair two
//! - **Autonomous leave**: a violated state guard makes the machine move by
//!   itself, or report a deadlock when it cannot
//! - **Parallel composition**: shared symbols synchronize, private ones
//!   interleave
//!
//! # Example
//!
//! ```rust
//! use tandem::core::{Comparison, Condition, State, Variables};
//! use tandem::machine::{FiniteStateMachine, MachineStatus, Transition};
//!
//! let heating = State::new("heating")
//!     .with_guard(Condition::variable("temp", Comparison::Less, 21));
//!
//! let mut thermostat = FiniteStateMachine::new(
//!     State::new("off"),
//!     vec![
//!         Transition::new("off", "power", heating.clone()),
//!         Transition::new(heating, "reached", "holding"),
//!     ],
//!     Variables::new().with("temp", 17),
//! )
//! .unwrap();
//!
//! thermostat.receive(&"power").unwrap();
//! assert_eq!(thermostat.current_state().id(), "heating");
//!
//! // The guard stops holding, so the machine leaves on its own.
//! let status = thermostat.set("temp", 21).unwrap();
//! assert_eq!(status, MachineStatus::Running);
//! assert_eq!(thermostat.current_state().id(), "holding");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;
pub mod runtime;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{Comparison, Condition, State, Symbol, Value, Variables};
pub use builder::{BuildError, MachineBuilder, TransitionBuilder};
pub use config::MachineConfig;
pub use machine::{FiniteStateMachine, MachineError, MachineStatus, Outcome, Transition};
pub use runtime::SharedMachine;
