//! State transition history tracking.
//!
//! Every state change a machine makes is recorded, whether it was driven
//! by an input symbol or taken autonomously after a guard was violated.
//! History is bounded: once full, the oldest record is dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// What caused a transition to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// An input symbol was received.
    Input,
    /// The machine left a state whose guard stopped holding.
    Autonomous,
}

/// Record of a single state transition.
///
/// States are recorded by id so records stay plain data.
///
/// # Example
///
/// ```rust
/// use tandem::core::{StateTransition, TransitionCause};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "idle".to_string(),
///     to: "active".to_string(),
///     input: "start",
///     cause: TransitionCause::Input,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.cause, TransitionCause::Input);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<Y> {
    /// Id of the state being left
    pub from: String,
    /// Id of the state being entered
    pub to: String,
    /// Symbol of the fired transition
    pub input: Y,
    pub cause: TransitionCause,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of state transitions.
///
/// # Example
///
/// ```rust
/// use tandem::core::{StateHistory, StateTransition, TransitionCause};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_capacity(8);
/// for (from, to) in [("a", "b"), ("b", "c")] {
///     history.record(StateTransition {
///         from: from.to_string(),
///         to: to.to_string(),
///         input: 0u8,
///         cause: TransitionCause::Input,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.get_path(), vec!["a", "b", "c"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<Y> {
    transitions: VecDeque<StateTransition<Y>>,
    capacity: usize,
}

impl<Y> StateHistory<Y> {
    /// Create an empty history keeping at most `capacity` records.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            capacity,
        }
    }

    /// Record a transition, dropping the oldest one if the history is full.
    pub fn record(&mut self, transition: StateTransition<Y>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Ids of the states traversed: the first recorded origin, then the
    /// destination of each transition.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Time between the first and last recorded transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<Y>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<Y>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: &str, to: &str, cause: TransitionCause) -> StateTransition<u8> {
        StateTransition {
            from: from.to_string(),
            to: to.to_string(),
            input: 1,
            cause,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<u8> = StateHistory::with_capacity(4);
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::with_capacity(4);
        history.record(transition("idle", "active", TransitionCause::Input));
        history.record(transition("active", "cooldown", TransitionCause::Autonomous));

        assert_eq!(history.get_path(), vec!["idle", "active", "cooldown"]);
        assert_eq!(
            history.last().map(|t| t.cause),
            Some(TransitionCause::Autonomous)
        );
    }

    #[test]
    fn oldest_record_is_dropped_when_full() {
        let mut history = StateHistory::with_capacity(2);
        history.record(transition("a", "b", TransitionCause::Input));
        history.record(transition("b", "c", TransitionCause::Input));
        history.record(transition("c", "d", TransitionCause::Input));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec!["b", "c", "d"]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = StateHistory::with_capacity(0);
        history.record(transition("a", "b", TransitionCause::Input));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::with_capacity(4);
        let start = Utc::now();
        let mut first = transition("a", "b", TransitionCause::Input);
        first.timestamp = start;
        let mut second = transition("b", "c", TransitionCause::Input);
        second.timestamp = start + chrono::Duration::milliseconds(10);

        history.record(first);
        history.record(second);

        assert_eq!(history.duration(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_capacity(4);
        history.record(transition("a", "b", TransitionCause::Autonomous));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<u8> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.capacity(), 4);
        assert_eq!(deserialized.last(), history.last());
    }
}
