//! Driving machines: dispatch, reactive guard handling and composition.
//!
//! # Key Concepts
//!
//! - **Transitions**: edges with an input symbol, a guard and an action
//! - **Dispatch**: the first enabled transition in table order fires
//! - **Autonomous leave**: when the current state's guard stops holding, the
//!   machine takes the first enabled exit on its own
//! - **Deadlock**: a violated state with no way out, reported as status
//! - **Composition**: product automaton of two machines

mod compose;
mod error;
mod fsm;
mod transition;

pub use compose::product_transitions;
pub use error::MachineError;
pub use fsm::{Deadlock, DeadlockReason, FiniteStateMachine, MachineStatus, Outcome};
pub use transition::{Action, Transition};
