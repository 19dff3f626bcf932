//! Definition checks using Validation.

use crate::core::{Condition, State, Symbol, Variables};
use crate::machine::{FiniteStateMachine, Transition};
use crate::validation::issues::DefinitionIssue;
use std::collections::{HashSet, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single check.
pub type Check = Validation<(), NonEmptyVec<DefinitionIssue>>;

/// Validate a machine definition, accumulating ALL issues.
///
/// Checks that guards only read variables present in the store with a
/// matching kind, that no transition is shadowed by an earlier unguarded
/// transition on the same origin and input, and that every state is
/// reachable from the initial state.
///
/// Guards are only inspected, never evaluated; custom predicates are opaque.
pub fn validate_definition<Y: Symbol>(
    initial: &State,
    transitions: &[Transition<Y>],
    variables: &Variables,
) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    let states = collect_states(initial, transitions);
    for state in &states {
        if let Some(guard) = state.guard() {
            let location = format!("Guard of state '{}'", state.id());
            checks.extend(check_guard(guard, &location, variables));
        }
    }
    for (index, transition) in transitions.iter().enumerate() {
        if let Some(guard) = &transition.guard {
            let location = format!("Guard of transition #{index}");
            checks.extend(check_guard(guard, &location, variables));
        }
    }

    let shadowed = shadowing(transitions);
    checks.extend(check_shadowing(transitions, &shadowed));
    checks.extend(check_reachability(initial, &states, transitions, &shadowed));

    // Accumulate ALL failures using all_vec
    Validation::all_vec(checks).map(|_| ())
}

/// Validate the definition a machine was built from.
pub fn validate<Y: Symbol>(machine: &FiniteStateMachine<Y>) -> Check {
    validate_definition(
        machine.initial_state(),
        machine.transitions(),
        machine.variables(),
    )
}

fn collect_states<'a, Y>(initial: &'a State, transitions: &'a [Transition<Y>]) -> Vec<&'a State> {
    let mut seen = HashSet::new();
    let mut states = Vec::new();
    let endpoints = transitions
        .iter()
        .flat_map(|t| [&t.origin, &t.destination]);
    for state in std::iter::once(initial).chain(endpoints) {
        if seen.insert(state) {
            states.push(state);
        }
    }
    states
}

fn check_guard(guard: &Condition, location: &str, variables: &Variables) -> Vec<Check> {
    guard
        .referenced_variables()
        .into_iter()
        .map(|(name, expected)| match variables.value(name) {
            Err(_) => Validation::fail(DefinitionIssue::UnknownVariable {
                name: name.to_string(),
                location: location.to_string(),
            }),
            Ok(current) if current.kind() != expected.kind() => {
                Validation::fail(DefinitionIssue::VariableKindMismatch {
                    name: name.to_string(),
                    location: location.to_string(),
                    expected: expected.kind(),
                    found: current.kind(),
                })
            }
            Ok(_) => Validation::success(()),
        })
        .collect()
}

/// For each transition, the earlier unguarded transition that always wins
/// over it, if any.
fn shadowing<Y: Symbol>(transitions: &[Transition<Y>]) -> Vec<Option<usize>> {
    transitions
        .iter()
        .enumerate()
        .map(|(index, later)| {
            transitions[..index].iter().position(|earlier| {
                earlier.origin == later.origin
                    && earlier.input == later.input
                    && matches!(earlier.guard, None | Some(Condition::Always))
            })
        })
        .collect()
}

fn check_shadowing<Y: Symbol>(
    transitions: &[Transition<Y>],
    shadowed: &[Option<usize>],
) -> Vec<Check> {
    transitions
        .iter()
        .zip(shadowed)
        .enumerate()
        .map(|(index, (later, shadowed_by))| match shadowed_by {
            Some(shadowed_by) => Validation::fail(DefinitionIssue::ShadowedTransition {
                index,
                shadowed_by: *shadowed_by,
                origin: later.origin.id().to_string(),
                input: format!("{:?}", later.input),
                destination: later.destination.id().to_string(),
            }),
            None => Validation::success(()),
        })
        .collect()
}

/// Breadth-first search from the initial state. Guards are ignored, but
/// shadowed transitions never fire and are skipped.
fn check_reachability<Y>(
    initial: &State,
    states: &[&State],
    transitions: &[Transition<Y>],
    shadowed: &[Option<usize>],
) -> Vec<Check> {
    let mut reached: HashSet<&State> = HashSet::from([initial]);
    let mut queue = VecDeque::from([initial]);
    while let Some(state) = queue.pop_front() {
        let live = transitions
            .iter()
            .zip(shadowed)
            .filter(|(t, shadowed_by)| shadowed_by.is_none() && &t.origin == state);
        for (transition, _) in live {
            if reached.insert(&transition.destination) {
                queue.push_back(&transition.destination);
            }
        }
    }

    states
        .iter()
        .map(|state| {
            if reached.contains(state) {
                Validation::success(())
            } else {
                Validation::fail(DefinitionIssue::UnreachableState {
                    state: state.id().to_string(),
                })
            }
        })
        .collect()
}
