//! Shared, clock-driven machines.
//!
//! A [`FiniteStateMachine`] is a plain value driven through `&mut self`.
//! [`SharedMachine`] puts one behind a single mutex so symbol dispatch,
//! variable mutation and timer ticks are serialized: every guard evaluation
//! sees the current state and the store change together.
//!
//! The handle binds to a tokio runtime when it is created. As soon as the
//! machine has a registered timer, whether from before wrapping or from a
//! later dispatch, a clock task on that runtime ticks the machine once per
//! configured period. The task only holds a weak reference, so it stops when
//! the last handle is dropped.

use crate::core::{State, Symbol, Value};
use crate::machine::{FiniteStateMachine, MachineError, MachineStatus, Outcome};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, warn};

/// Thread-safe handle to a machine with a timer clock.
///
/// # Example
///
/// ```rust
/// use tandem::core::{State, Variables};
/// use tandem::machine::{FiniteStateMachine, Transition};
/// use tandem::runtime::SharedMachine;
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_time()
///     .build()
///     .unwrap();
///
/// let machine = FiniteStateMachine::new(
///     State::new("idle"),
///     vec![Transition::new("idle", 1u8, "busy")],
///     Variables::new(),
/// )
/// .unwrap();
///
/// let shared = SharedMachine::with_handle(machine, runtime.handle().clone()).unwrap();
/// shared.receive(&1).unwrap();
/// assert_eq!(shared.current_state().id(), "busy");
/// assert!(!shared.is_clock_running());
/// ```
pub struct SharedMachine<Y: Symbol> {
    machine: Arc<Mutex<FiniteStateMachine<Y>>>,
    clock: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
    period: Duration,
}

impl<Y: Symbol> SharedMachine<Y> {
    /// Wrap a machine, binding the clock to the ambient tokio runtime.
    ///
    /// Fails with [`MachineError::NoRuntime`] outside a runtime and with
    /// [`MachineError::InvalidTickPeriod`] for a zero period. The clock
    /// starts right away if the machine already has a timer.
    pub fn new(machine: FiniteStateMachine<Y>) -> Result<Self, MachineError> {
        let runtime = Handle::try_current().map_err(|_| MachineError::NoRuntime)?;
        Self::with_handle(machine, runtime)
    }

    /// Wrap a machine, running its clock on `runtime`.
    pub fn with_handle(
        machine: FiniteStateMachine<Y>,
        runtime: Handle,
    ) -> Result<Self, MachineError> {
        let period = machine.config().tick_period();
        if period.is_zero() {
            return Err(MachineError::InvalidTickPeriod);
        }
        let shared = Self {
            machine: Arc::new(Mutex::new(machine)),
            clock: Mutex::new(None),
            runtime,
            period,
        };
        shared.ensure_clock();
        Ok(shared)
    }

    /// Dispatch one input symbol.
    ///
    /// Starts the clock if the fired action registered a timer.
    pub fn receive(&self, symbol: &Y) -> Result<Outcome, MachineError> {
        let outcome = self.machine.lock().receive(symbol);
        self.ensure_clock();
        outcome
    }

    /// Set a variable and re-check the current state's guard.
    pub fn set(
        &self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<MachineStatus, MachineError> {
        let status = self.machine.lock().set(name, value);
        self.ensure_clock();
        status
    }

    /// Register or restart a timer, starting the clock if needed.
    pub fn reset_timer(&self, name: impl Into<String>) -> Result<MachineStatus, MachineError> {
        let status = self.machine.lock().reset_timer(name);
        self.ensure_clock();
        status
    }

    pub fn current_state(&self) -> State {
        self.machine.lock().current_state().clone()
    }

    pub fn status(&self) -> MachineStatus {
        self.machine.lock().status().clone()
    }

    /// Read the machine while holding the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&FiniteStateMachine<Y>) -> R) -> R {
        f(&self.machine.lock())
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn ensure_clock(&self) {
        if !self.machine.lock().variables().has_timers() {
            return;
        }
        let mut clock = self.clock.lock();
        if clock.is_some() {
            return;
        }
        debug!(period = ?self.period, "starting timer clock");
        *clock = Some(
            self.runtime
                .spawn(run_clock(Arc::downgrade(&self.machine), self.period)),
        );
    }
}

impl<Y: Symbol> Drop for SharedMachine<Y> {
    fn drop(&mut self) {
        if let Some(handle) = self.clock.get_mut().take() {
            handle.abort();
        }
    }
}

async fn run_clock<Y: Symbol>(machine: Weak<Mutex<FiniteStateMachine<Y>>>, period: Duration) {
    let mut interval = interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        let Some(strong) = machine.upgrade() else {
            break;
        };
        let result = strong.lock().tick();
        match result {
            Ok(MachineStatus::Running) => {}
            Ok(MachineStatus::Deadlocked(deadlock)) => {
                warn!(state = %deadlock.state, "clock tick left machine deadlocked");
            }
            Err(err) => {
                error!(error = %err, "clock tick failed, stopping clock");
                break;
            }
        }
    }
}
