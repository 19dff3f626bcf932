//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Condition, GuardError, State, Symbol, Variables};
use crate::machine::{Action, Transition};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<Y> {
    from: Option<State>,
    input: Option<Y>,
    to: Option<State>,
    guard: Option<Condition>,
    action: Option<Action>,
}

impl<Y: Symbol> TransitionBuilder<Y> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            input: None,
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the origin state (required).
    pub fn from(mut self, state: impl Into<State>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the input symbol (required).
    pub fn on(mut self, symbol: Y) -> Self {
        self.input = Some(symbol);
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: impl Into<State>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Add a guard (optional). Repeated calls are combined with AND.
    pub fn guard(mut self, guard: Condition) -> Self {
        self.guard = Some(match self.guard.take() {
            Some(existing) => existing.and(guard),
            None => guard,
        });
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Variables) -> Result<bool, GuardError> + Send + Sync + 'static,
    {
        self.guard(Condition::custom(predicate))
    }

    /// Set the action (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Variables) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<Y>, BuildError> {
        let origin = self.from.ok_or(BuildError::MissingOrigin)?;
        let input = self.input.ok_or(BuildError::MissingInput)?;
        let destination = self.to.ok_or(BuildError::MissingDestination)?;

        Ok(Transition {
            origin,
            input,
            destination,
            guard: self.guard,
            action: self.action,
        })
    }
}

impl<Y: Symbol> Default for TransitionBuilder<Y> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Comparison;

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<u8>::new().from("a").on(1).build();
        assert!(matches!(result, Err(BuildError::MissingDestination)));

        let result = TransitionBuilder::<u8>::new().from("a").to("b").build();
        assert!(matches!(result, Err(BuildError::MissingInput)));

        let result = TransitionBuilder::<u8>::new().on(1).to("b").build();
        assert!(matches!(result, Err(BuildError::MissingOrigin)));
    }

    #[test]
    fn repeated_guards_are_conjoined() {
        let transition = TransitionBuilder::new()
            .from("a")
            .on('x')
            .to("b")
            .guard(Condition::variable("n", Comparison::Greater, 0))
            .when(|vars| Ok(vars.int("n")? < 10))
            .build()
            .unwrap();

        assert!(transition
            .is_enabled(&Variables::new().with("n", 5))
            .unwrap());
        assert!(!transition
            .is_enabled(&Variables::new().with("n", 0))
            .unwrap());
        assert!(!transition
            .is_enabled(&Variables::new().with("n", 12))
            .unwrap());
    }

    #[test]
    fn fluent_api_builds_transition() {
        let transition = TransitionBuilder::new()
            .from("locked")
            .on("coin")
            .to("unlocked")
            .action(|vars| vars.set("paid", true))
            .build()
            .unwrap();

        assert_eq!(transition.origin.id(), "locked");
        assert_eq!(transition.input, "coin");
        assert_eq!(transition.destination.id(), "unlocked");

        let mut vars = Variables::new();
        transition.run_action(&mut vars);
        assert!(vars.boolean("paid").unwrap());
    }
}
