//! Build errors for machine and transition builders.

use crate::machine::MachineError;
use crate::validation::DefinitionIssue;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition origin not specified. Call .from(state)")]
    MissingOrigin,

    #[error("Transition input not specified. Call .on(symbol)")]
    MissingInput,

    #[error("Transition destination not specified. Call .to(state)")]
    MissingDestination,

    #[error("Machine definition has {} issue(s)", .0.len())]
    Invalid(Vec<DefinitionIssue>),

    #[error(transparent)]
    Machine(#[from] MachineError),
}
