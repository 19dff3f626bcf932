//! Core building blocks of a machine definition.
//!
//! This module contains the plain data a machine is made of:
//! - Dynamically-typed values and the variable store
//! - Guard conditions evaluated against that store
//! - States, including compound product states
//! - Bounded transition history
//!
//! Nothing in here drives a machine; see [`crate::machine`] for that.

mod condition;
mod error;
mod history;
mod state;
mod value;
mod variables;

pub use condition::{Comparison, Condition, Predicate};
pub use error::GuardError;
pub use history::{StateHistory, StateTransition, TransitionCause};
pub use state::{State, Symbol};
pub use value::{Value, ValueKind};
pub use variables::Variables;
