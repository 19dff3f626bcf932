//! Validation of machine definitions.
//!
//! Guard evaluation fails fast at runtime when a guard reads a variable that
//! is missing or of the wrong kind. This module finds those problems, and a
//! few structural ones, ahead of time. It uses Stillwater's `Validation`
//! type so every issue is reported in a single pass.
//!
//! # Example
//!
//! ```rust
//! use tandem::core::{Comparison, Condition, State, Variables};
//! use tandem::machine::Transition;
//! use tandem::validation::validate_definition;
//!
//! let transitions = vec![
//!     Transition::new("idle", 'g', "running")
//!         .when(Condition::variable("fuel", Comparison::Greater, 0)),
//! ];
//!
//! let empty = Variables::new();
//! assert!(validate_definition(&State::new("idle"), &transitions, &empty).is_failure());
//!
//! let fuelled = Variables::new().with("fuel", 3);
//! assert!(validate_definition(&State::new("idle"), &transitions, &fuelled).is_success());
//! ```

pub mod issues;
pub mod rules;

// Re-export commonly used types
pub use issues::DefinitionIssue;
pub use rules::{validate, validate_definition, Check};
