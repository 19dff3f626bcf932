//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::config::MachineConfig;
use crate::core::{State, Symbol, Value, Variables};
use crate::machine::{FiniteStateMachine, Transition};
use crate::validation::validate_definition;
use stillwater::validation::Validation;

/// Builder for constructing machines with a fluent API.
pub struct MachineBuilder<Y: Symbol> {
    initial: Option<State>,
    transitions: Vec<Transition<Y>>,
    variables: Variables,
    config: MachineConfig,
    strict: bool,
}

impl<Y: Symbol> MachineBuilder<Y> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            variables: Variables::new(),
            config: MachineConfig::default(),
            strict: false,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<State>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<Y>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<Y>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<Y>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Replace the variable store.
    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Set one variable in the store.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.set(name, value);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Reject definitions with issues found by
    /// [`validate_definition`] instead of building them.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing, if strict checks
    /// fail, or if the initial guard evaluation fails.
    pub fn build(self) -> Result<FiniteStateMachine<Y>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.strict {
            if let Validation::Failure(issues) =
                validate_definition(&initial, &self.transitions, &self.variables)
            {
                return Err(BuildError::Invalid(issues.iter().cloned().collect()));
            }
        }

        let machine =
            FiniteStateMachine::with_config(initial, self.transitions, self.variables, self.config)?;
        Ok(machine)
    }
}

impl<Y: Symbol> Default for MachineBuilder<Y> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Comparison, Condition, GuardError};
    use crate::machine::MachineError;
    use crate::validation::DefinitionIssue;

    #[test]
    fn builder_validates_required_fields() {
        let result = MachineBuilder::<u8>::new().build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn machine_without_transitions_is_allowed() {
        let machine = MachineBuilder::<u8>::new().initial("alone").build().unwrap();
        assert_eq!(machine.current_state().id(), "alone");
        assert!(machine.symbols().is_empty());
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = MachineBuilder::new()
            .initial("idle")
            .transition(TransitionBuilder::new().from("idle").on('s').to("active"))
            .unwrap()
            .add_transition(Transition::new("active", 'p', "idle"))
            .variable("count", 0)
            .config(MachineConfig::default().with_history_capacity(4))
            .build()
            .unwrap();

        assert_eq!(machine.transitions().len(), 2);
        assert_eq!(machine.variables().int("count").unwrap(), 0);
        assert_eq!(machine.config().history_capacity, 4);
    }

    #[test]
    fn invalid_transition_builder_is_rejected() {
        let result = MachineBuilder::<char>::new()
            .initial("idle")
            .transition(TransitionBuilder::new().from("idle").to("active"));
        assert!(matches!(result, Err(BuildError::MissingInput)));
    }

    #[test]
    fn strict_build_reports_all_issues() {
        let result = MachineBuilder::new()
            .initial("a")
            .transitions(vec![
                Transition::new("a", 'x', "b")
                    .when(Condition::variable("missing", Comparison::Equal, 1)),
                Transition::new("z", 'y', "a"),
            ])
            .strict()
            .build();

        match result {
            Err(BuildError::Invalid(issues)) => {
                assert_eq!(issues.len(), 2);
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, DefinitionIssue::UnknownVariable { .. })));
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, DefinitionIssue::UnreachableState { .. })));
            }
            other => panic!("expected invalid definition, got {other:?}"),
        }
    }

    #[test]
    fn lenient_build_surfaces_guard_errors_at_construction() {
        let result = MachineBuilder::<u8>::new()
            .initial(State::new("a").with_guard(Condition::variable("x", Comparison::Less, 1)))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Machine(MachineError::Guard(
                GuardError::UnsetVariable { .. }
            )))
        ));
    }
}
