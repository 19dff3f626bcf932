//! Guard evaluation errors.

use super::value::ValueKind;
use thiserror::Error;

/// Errors raised while reading the variable store during guard evaluation.
///
/// These indicate a malformed machine definition: a guard that names a
/// variable or timer nobody provides, or that compares a variable against a
/// value of another kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("Variable '{name}' holds a {found} value, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Variable '{name}' is not set")]
    UnsetVariable { name: String },

    #[error("Timer '{name}' was never reset")]
    UnregisteredTimer { name: String },
}
