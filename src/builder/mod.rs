//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders for transitions and machines, plus
//! shorthands for the two most common transition shapes.

pub mod error;
pub mod machine;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Condition, State, Symbol};
use crate::machine::Transition;

/// Create an unguarded transition without an action.
///
/// # Example
///
/// ```
/// use tandem::builder::simple_transition;
///
/// let transition = simple_transition("red", "timer", "green");
/// assert_eq!(transition.origin.id(), "red");
/// assert!(transition.guard.is_none());
/// ```
pub fn simple_transition<Y: Symbol>(
    from: impl Into<State>,
    on: Y,
    to: impl Into<State>,
) -> Transition<Y> {
    Transition::new(from, on, to)
}

/// Create a transition that only fires while `guard` holds.
///
/// # Example
///
/// ```
/// use tandem::builder::guarded_transition;
/// use tandem::core::{Comparison, Condition, Variables};
///
/// let transition = guarded_transition(
///     "red",
///     "timer",
///     "green",
///     Condition::variable("cars_waiting", Comparison::Greater, 0),
/// );
///
/// let vars = Variables::new().with("cars_waiting", 0);
/// assert!(!transition.is_enabled(&vars).unwrap());
/// ```
pub fn guarded_transition<Y: Symbol>(
    from: impl Into<State>,
    on: Y,
    to: impl Into<State>,
    guard: Condition,
) -> Transition<Y> {
    Transition::new(from, on, to).when(guard)
}
