//! Parallel composition of two machines into a product automaton.
//!
//! Symbols in both alphabets synchronize: the product only moves when both
//! machines can move together. Symbols private to one machine interleave:
//! that machine moves while the other idles in whatever state it is in.

use crate::core::{Condition, State, Symbol};
use crate::machine::error::MachineError;
use crate::machine::fsm::FiniteStateMachine;
use crate::machine::transition::{sequence, Transition};
use tracing::debug;

impl<Y: Symbol> FiniteStateMachine<Y> {
    /// Build the product automaton of `self` and `other`.
    ///
    /// The product starts in the compound of both initial states, uses
    /// `self`'s configuration and the merge of both variable stores (`self`
    /// winning on name collisions).
    ///
    /// # Example
    ///
    /// ```rust
    /// use tandem::core::{State, Variables};
    /// use tandem::machine::{FiniteStateMachine, Transition};
    ///
    /// let door = FiniteStateMachine::new(
    ///     State::new("closed"),
    ///     vec![
    ///         Transition::new("closed", "open", "opened"),
    ///         Transition::new("opened", "leave", "closed"),
    ///     ],
    ///     Variables::new(),
    /// )
    /// .unwrap();
    /// let light = FiniteStateMachine::new(
    ///     State::new("dark"),
    ///     vec![Transition::new("dark", "open", "lit")],
    ///     Variables::new(),
    /// )
    /// .unwrap();
    ///
    /// let mut room = door.compose(&light).unwrap();
    /// assert_eq!(room.current_state().id(), "closed, dark");
    ///
    /// room.receive(&"open").unwrap();
    /// assert_eq!(room.current_state().id(), "opened, lit");
    ///
    /// room.receive(&"leave").unwrap();
    /// assert_eq!(room.current_state().id(), "closed, lit");
    /// ```
    pub fn compose(&self, other: &Self) -> Result<Self, MachineError> {
        let initial = State::compound(self.initial_state(), other.initial_state());
        let transitions = product_transitions(self, other);
        debug!(
            left_transitions = self.transitions().len(),
            right_transitions = other.transitions().len(),
            product_transitions = transitions.len(),
            "composed machines"
        );
        Self::with_config(
            initial,
            transitions,
            self.variables().merge(other.variables()),
            self.config().clone(),
        )
    }
}

/// Transition table of the product of `left` and `right`.
///
/// For each transition of `left`, in order: its synchronized pairings with
/// `right`'s transitions, then, if its symbol is private, one interleaving
/// per state of `right`. Then the interleavings of `right`'s private
/// symbols, one per state of `left`.
pub fn product_transitions<Y: Symbol>(
    left: &FiniteStateMachine<Y>,
    right: &FiniteStateMachine<Y>,
) -> Vec<Transition<Y>> {
    let mut product = Vec::new();

    for l in left.transitions() {
        for r in right.transitions().iter().filter(|r| r.input == l.input) {
            product.push(synchronized(l, r));
        }
        if !right.symbols().contains(&l.input) {
            for idle in right.states() {
                product.push(Transition {
                    origin: State::compound(&l.origin, idle),
                    input: l.input.clone(),
                    destination: State::compound(&l.destination, idle),
                    guard: l.guard.clone(),
                    action: l.action.clone(),
                });
            }
        }
    }

    for r in right.transitions() {
        if !left.symbols().contains(&r.input) {
            for idle in left.states() {
                product.push(Transition {
                    origin: State::compound(idle, &r.origin),
                    input: r.input.clone(),
                    destination: State::compound(idle, &r.destination),
                    guard: r.guard.clone(),
                    action: r.action.clone(),
                });
            }
        }
    }

    product
}

fn synchronized<Y: Symbol>(left: &Transition<Y>, right: &Transition<Y>) -> Transition<Y> {
    Transition {
        origin: State::compound(&left.origin, &right.origin),
        input: left.input.clone(),
        destination: State::compound(&left.destination, &right.destination),
        guard: Condition::all(left.guard.as_ref(), right.guard.as_ref()),
        action: sequence(left.action.as_ref(), right.action.as_ref()),
    }
}
