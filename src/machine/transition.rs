//! Transitions between states, with guards and actions.

use crate::core::{Condition, GuardError, State, Symbol, Variables};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Side effect run when a transition fires.
///
/// Actions receive the machine's store explicitly; state an action needs to
/// keep between firings belongs in the store, not in captured variables.
pub type Action = Arc<dyn Fn(&mut Variables) + Send + Sync>;

/// A transition from one state to another on an input symbol.
///
/// Equality and hashing use `(origin, input, destination)` only, so two
/// transitions along the same edge compare equal even when their guards or
/// actions differ. A machine keeps every transition it is given, so several
/// guarded transitions along one edge coexist and are tried in order.
///
/// # Example
///
/// ```rust
/// use tandem::core::{Comparison, Condition, Variables};
/// use tandem::machine::Transition;
///
/// let pay = Transition::new("locked", "coin", "unlocked")
///     .when(Condition::variable("coins", Comparison::Greater, 0))
///     .then(|vars| {
///         let coins = vars.int("coins").unwrap_or(0);
///         vars.set("coins", coins - 1);
///     });
///
/// let mut vars = Variables::new().with("coins", 1);
/// assert!(pay.is_enabled(&vars).unwrap());
/// pay.run_action(&mut vars);
/// assert!(!pay.is_enabled(&vars).unwrap());
/// ```
pub struct Transition<Y> {
    pub origin: State,
    pub input: Y,
    pub destination: State,
    pub guard: Option<Condition>,
    pub action: Option<Action>,
}

impl<Y: Symbol> Transition<Y> {
    /// Unguarded transition without an action.
    pub fn new(origin: impl Into<State>, input: Y, destination: impl Into<State>) -> Self {
        Self {
            origin: origin.into(),
            input,
            destination: destination.into(),
            guard: None,
            action: None,
        }
    }

    /// Set the guard, replacing any previous one.
    pub fn when(mut self, guard: Condition) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Set the action, replacing any previous one.
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Variables) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Whether the guard currently allows this transition (pure).
    pub fn is_enabled(&self, variables: &Variables) -> Result<bool, GuardError> {
        match &self.guard {
            Some(guard) => guard.is_satisfied(variables),
            None => Ok(true),
        }
    }

    pub fn run_action(&self, variables: &mut Variables) {
        if let Some(action) = &self.action {
            action(variables);
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.origin == self.destination
    }
}

/// Run `first` then `second`; a missing side is skipped.
pub(crate) fn sequence(first: Option<&Action>, second: Option<&Action>) -> Option<Action> {
    match (first, second) {
        (None, None) => None,
        (Some(a), None) | (None, Some(a)) => Some(Arc::clone(a)),
        (Some(a), Some(b)) => {
            let (a, b) = (Arc::clone(a), Arc::clone(b));
            Some(Arc::new(move |vars: &mut Variables| {
                a(vars);
                b(vars);
            }))
        }
    }
}

impl<Y: Clone> Clone for Transition<Y> {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin.clone(),
            input: self.input.clone(),
            destination: self.destination.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
        }
    }
}

impl<Y: PartialEq> PartialEq for Transition<Y> {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.input == other.input
            && self.destination == other.destination
    }
}

impl<Y: Eq> Eq for Transition<Y> {}

impl<Y: Hash> Hash for Transition<Y> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.input.hash(state);
        self.destination.hash(state);
    }
}

impl<Y: fmt::Debug> fmt::Debug for Transition<Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("origin", &self.origin.id())
            .field("input", &self.input)
            .field("destination", &self.destination.id())
            .field("guard", &self.guard)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
