//! Problems found in a machine definition.

use crate::core::ValueKind;
use thiserror::Error;

/// Issues found when validating a machine definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionIssue {
    #[error("{location} reads variable '{name}', which is not in the store")]
    UnknownVariable { name: String, location: String },

    #[error("{location} compares variable '{name}' ({found}) against a {expected} value")]
    VariableKindMismatch {
        name: String,
        location: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error(
        "Transition #{index} ({origin} --{input}--> {destination}) can never fire: \
         unguarded transition #{shadowed_by} takes the same input first"
    )]
    ShadowedTransition {
        index: usize,
        shadowed_by: usize,
        origin: String,
        input: String,
        destination: String,
    },

    #[error("State '{state}' is unreachable from the initial state")]
    UnreachableState { state: String },
}
