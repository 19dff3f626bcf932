//! Finite state machine with reactive guard handling.

use crate::config::MachineConfig;
use crate::core::{
    GuardError, State, StateHistory, StateTransition, Symbol, TransitionCause, Value, Variables,
};
use crate::machine::error::MachineError;
use crate::machine::transition::Transition;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Why a machine is stuck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlockReason {
    /// No enabled transition leads away from the current state.
    NoExit,
    /// Autonomous leaves kept landing in violated states until the
    /// configured bound was reached.
    LeaveLimit,
}

/// A state whose guard is violated and which the machine cannot leave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadlock {
    /// Id of the stuck state
    pub state: String,
    pub reason: DeadlockReason,
}

/// Observable health of a machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    /// The current state's guard holds (or it has none).
    Running,
    Deadlocked(Deadlock),
}

/// Result of feeding one symbol to a machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No enabled transition matched; nothing changed.
    Ignored,
    /// A transition fired and the machine settled in `to`.
    Moved { to: String },
    /// A transition fired but the machine ended up deadlocked.
    Deadlocked(Deadlock),
}

/// A reactive finite state machine.
///
/// The machine is always in exactly one state. Symbols are dispatched in
/// transition-table order; after every change the current state's guard is
/// re-checked and, if violated, the machine leaves the state on its own.
///
/// # Example
///
/// ```rust
/// use tandem::core::{State, Variables};
/// use tandem::machine::{FiniteStateMachine, Outcome, Transition};
///
/// let mut machine = FiniteStateMachine::new(
///     State::new("idle"),
///     vec![Transition::new("idle", "start", "active")],
///     Variables::new(),
/// )
/// .unwrap();
///
/// assert_eq!(
///     machine.receive(&"start").unwrap(),
///     Outcome::Moved { to: "active".to_string() }
/// );
/// assert_eq!(machine.receive(&"start").unwrap(), Outcome::Ignored);
/// assert_eq!(machine.current_state().id(), "active");
/// ```
#[derive(Debug)]
pub struct FiniteStateMachine<Y: Symbol> {
    initial: State,
    current: State,
    states: Vec<State>,
    symbols: Vec<Y>,
    transitions: Vec<Transition<Y>>,
    variables: Variables,
    status: MachineStatus,
    history: StateHistory<Y>,
    config: MachineConfig,
}

impl<Y: Symbol> FiniteStateMachine<Y> {
    /// Create a machine with the default configuration.
    ///
    /// States and alphabet are derived from the transitions. If the initial
    /// state's guard is already violated, the machine leaves it right away
    /// or reports a deadlock.
    pub fn new(
        initial: State,
        transitions: Vec<Transition<Y>>,
        variables: Variables,
    ) -> Result<Self, MachineError> {
        Self::with_config(initial, transitions, variables, MachineConfig::default())
    }

    pub fn with_config(
        initial: State,
        transitions: Vec<Transition<Y>>,
        variables: Variables,
        config: MachineConfig,
    ) -> Result<Self, MachineError> {
        let mut states = vec![initial.clone()];
        let mut symbols = Vec::new();
        for transition in &transitions {
            push_unique(&mut states, &transition.origin);
            push_unique(&mut states, &transition.destination);
            push_unique(&mut symbols, &transition.input);
        }

        let mut machine = Self {
            current: initial.clone(),
            initial,
            states,
            symbols,
            transitions,
            variables,
            status: MachineStatus::Running,
            history: StateHistory::with_capacity(config.history_capacity),
            config,
        };
        machine.settle()?;
        Ok(machine)
    }

    pub fn current_state(&self) -> &State {
        &self.current
    }

    pub fn initial_state(&self) -> &State {
        &self.initial
    }

    /// Every state named by the transition table, plus the initial state.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The alphabet, in first-seen order.
    pub fn symbols(&self) -> &[Y] {
        &self.symbols
    }

    pub fn transitions(&self) -> &[Transition<Y>] {
        &self.transitions
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn status(&self) -> &MachineStatus {
        &self.status
    }

    pub fn is_deadlocked(&self) -> bool {
        matches!(self.status, MachineStatus::Deadlocked(_))
    }

    pub fn history(&self) -> &StateHistory<Y> {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Dispatch one input symbol.
    ///
    /// The first transition in table order leaving the current state on
    /// `symbol` whose guard holds fires: the machine moves, runs the action,
    /// then re-checks the new state's guard. Without a match the symbol is
    /// ignored.
    pub fn receive(&mut self, symbol: &Y) -> Result<Outcome, MachineError> {
        let Some(index) =
            self.first_enabled(|t| t.origin == self.current && &t.input == symbol)?
        else {
            trace!(state = %self.current.id(), ?symbol, "symbol ignored");
            return Ok(Outcome::Ignored);
        };

        self.fire(index, TransitionCause::Input);
        Ok(match self.settle()? {
            MachineStatus::Running => Outcome::Moved {
                to: self.current.id().to_string(),
            },
            MachineStatus::Deadlocked(deadlock) => Outcome::Deadlocked(deadlock),
        })
    }

    /// Set a variable, then re-check the current state's guard.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<MachineStatus, MachineError> {
        self.variables.set(name, value);
        self.settle()
    }

    /// Register or restart a timer, then re-check the current state's guard.
    pub fn reset_timer(&mut self, name: impl Into<String>) -> Result<MachineStatus, MachineError> {
        self.variables.reset_timer(name);
        self.settle()
    }

    /// Advance every timer by one tick, then re-check the current state's
    /// guard. Called by the runtime clock once per period.
    pub fn tick(&mut self) -> Result<MachineStatus, MachineError> {
        self.variables.tick();
        self.settle()
    }

    /// Re-check the current state's guard and leave the state while it is
    /// violated, up to the configured number of autonomous leaves.
    pub fn settle(&mut self) -> Result<MachineStatus, MachineError> {
        let mut leaves = 0;
        loop {
            if self.current_guard_holds()? {
                self.status = MachineStatus::Running;
                return Ok(self.status.clone());
            }
            if leaves >= self.config.max_autonomous_leaves {
                return Ok(self.deadlock(DeadlockReason::LeaveLimit));
            }
            let Some(index) = self.first_enabled(|t| t.origin == self.current && !t.is_self_loop())?
            else {
                return Ok(self.deadlock(DeadlockReason::NoExit));
            };
            self.fire(index, TransitionCause::Autonomous);
            leaves += 1;
        }
    }

    fn current_guard_holds(&self) -> Result<bool, GuardError> {
        match self.current.guard() {
            Some(guard) => guard.is_satisfied(&self.variables),
            None => Ok(true),
        }
    }

    fn first_enabled<P>(&self, matches: P) -> Result<Option<usize>, GuardError>
    where
        P: Fn(&Transition<Y>) -> bool,
    {
        for (index, transition) in self.transitions.iter().enumerate() {
            if matches(transition) && transition.is_enabled(&self.variables)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn fire(&mut self, index: usize, cause: TransitionCause) {
        let transition = &self.transitions[index];
        let from = std::mem::replace(&mut self.current, transition.destination.clone());
        debug!(
            from = %from.id(),
            to = %transition.destination.id(),
            input = ?transition.input,
            ?cause,
            "transition fired"
        );
        self.history.record(StateTransition {
            from: from.id().to_string(),
            to: transition.destination.id().to_string(),
            input: transition.input.clone(),
            cause,
            timestamp: Utc::now(),
        });
        transition.run_action(&mut self.variables);
    }

    fn deadlock(&mut self, reason: DeadlockReason) -> MachineStatus {
        let deadlock = Deadlock {
            state: self.current.id().to_string(),
            reason,
        };
        let already_reported = matches!(&self.status, MachineStatus::Deadlocked(d) if *d == deadlock);
        if !already_reported {
            warn!(state = %deadlock.state, ?reason, "machine deadlocked");
        }
        self.status = MachineStatus::Deadlocked(deadlock);
        self.status.clone()
    }
}

fn push_unique<T: Clone + PartialEq>(items: &mut Vec<T>, item: &T) {
    if !items.contains(item) {
        items.push(item.clone());
    }
}
