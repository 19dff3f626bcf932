//! Machine errors.

use crate::core::GuardError;
use thiserror::Error;

/// Errors that abort a machine operation.
///
/// Deadlock is not an error; it is reported through
/// [`MachineStatus`](super::MachineStatus).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Guard evaluation failed: {0}")]
    Guard(#[from] GuardError),

    #[error("Timer clock needs a tokio runtime, none is running")]
    NoRuntime,

    #[error("Timer clock period must be non-zero")]
    InvalidTickPeriod,
}
