//! States and compound product states.
//!
//! A state is an identity, a display name and an optional guard that must
//! keep holding while the machine occupies it. Parallel composition pairs
//! states into compound states that remember both constituents.

use super::condition::Condition;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Input token driving transitions.
///
/// Any cloneable, hashable, debuggable type works as a symbol; the engine
/// only ever compares symbols for equality.
pub trait Symbol: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> Symbol for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// A machine state.
///
/// Equality is identity plus constituents: two compound states are equal
/// only when built from pairwise-equal constituents in the same order.
/// The guard does not take part in equality.
///
/// # Example
///
/// ```rust
/// use tandem::core::State;
///
/// let idle = State::new("idle");
/// let lamp = State::new("off").with_name("Lamp off");
/// let both = State::compound(&idle, &lamp);
///
/// assert_eq!(both.id(), "idle, off");
/// assert_eq!(both.name(), "idle, Lamp off");
/// assert!(both.contains(&idle));
/// assert!(!idle.contains(&lamp));
/// ```
#[derive(Clone, Debug)]
pub struct State {
    id: String,
    name: String,
    guard: Option<Condition>,
    parts: Option<Arc<(State, State)>>,
}

impl State {
    /// A simple state whose name is its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            guard: None,
            parts: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach a guard that must hold while the machine is in this state.
    pub fn with_guard(mut self, guard: Condition) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Pair two states into a product state.
    ///
    /// The guard is the conjunction of both constituents' guards.
    pub fn compound(left: &State, right: &State) -> Self {
        Self {
            id: format!("{}, {}", left.id, right.id),
            name: format!("{}, {}", left.name, right.name),
            guard: Condition::all(left.guard.as_ref(), right.guard.as_ref()),
            parts: Some(Arc::new((left.clone(), right.clone()))),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn guard(&self) -> Option<&Condition> {
        self.guard.as_ref()
    }

    pub fn is_compound(&self) -> bool {
        self.parts.is_some()
    }

    /// Left and right constituents of a compound state.
    pub fn constituents(&self) -> Option<(&State, &State)> {
        self.parts.as_deref().map(|(left, right)| (left, right))
    }

    /// Whether `other` is this state or nested anywhere inside it.
    pub fn contains(&self, other: &State) -> bool {
        if self == other {
            return true;
        }
        match self.constituents() {
            Some((left, right)) => left.contains(other) || right.contains(other),
            None => false,
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.constituents() == other.constituents()
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for State {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for State {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Comparison, Variables};
    use std::collections::HashSet;

    #[test]
    fn name_defaults_to_id() {
        let state = State::new("idle");
        assert_eq!(state.id(), "idle");
        assert_eq!(state.name(), "idle");
        assert!(state.guard().is_none());
        assert!(!state.is_compound());
    }

    #[test]
    fn equality_ignores_name_and_guard() {
        let plain = State::new("a");
        let decorated = State::new("a")
            .with_name("Alpha")
            .with_guard(Condition::always());
        assert_eq!(plain, decorated);
    }

    #[test]
    fn compound_concatenates_identity() {
        let a = State::new("a").with_name("A");
        let b = State::new("b").with_name("B");
        let ab = State::compound(&a, &b);

        assert_eq!(ab.id(), "a, b");
        assert_eq!(ab.name(), "A, B");
        assert_eq!(ab.constituents(), Some((&a, &b)));
        assert_eq!(ab.to_string(), "A, B");
    }

    #[test]
    fn compound_equality_respects_order_and_structure() {
        let a = State::new("a");
        let b = State::new("b");
        let c = State::new("c");

        assert_eq!(State::compound(&a, &b), State::compound(&a, &b));
        assert_ne!(State::compound(&a, &b), State::compound(&b, &a));

        let left_nested = State::compound(&State::compound(&a, &b), &c);
        let right_nested = State::compound(&a, &State::compound(&b, &c));
        assert_eq!(left_nested.id(), right_nested.id());
        assert_ne!(left_nested, right_nested);

        // A simple state that happens to share the id is still different.
        assert_ne!(State::new("a, b"), State::compound(&a, &b));
    }

    #[test]
    fn contains_searches_recursively() {
        let a = State::new("a");
        let b = State::new("b");
        let c = State::new("c");
        let abc = State::compound(&State::compound(&a, &b), &c);

        assert!(abc.contains(&a));
        assert!(abc.contains(&b));
        assert!(abc.contains(&c));
        assert!(abc.contains(&State::compound(&a, &b)));
        assert!(abc.contains(&abc));
        assert!(!abc.contains(&State::new("d")));
        assert!(a.contains(&a));
        assert!(!a.contains(&b));
    }

    #[test]
    fn compound_guard_is_conjunction() {
        let low = State::new("low").with_guard(Condition::variable("x", Comparison::Less, 10));
        let high =
            State::new("high").with_guard(Condition::variable("x", Comparison::Greater, 2));
        let both = State::compound(&low, &high);
        let guard = both.guard().unwrap();

        assert!(guard.is_satisfied(&Variables::new().with("x", 5)).unwrap());
        assert!(!guard.is_satisfied(&Variables::new().with("x", 1)).unwrap());
        assert!(!guard.is_satisfied(&Variables::new().with("x", 11)).unwrap());
    }

    #[test]
    fn compound_of_unguarded_states_has_no_guard() {
        let both = State::compound(&State::new("a"), &State::new("b"));
        assert!(both.guard().is_none());
    }

    #[test]
    fn states_deduplicate_in_sets() {
        let a = State::new("a");
        let b = State::new("b");
        let set: HashSet<State> = [
            State::compound(&a, &b),
            State::compound(&a, &b),
            State::compound(&b, &a),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }
}
