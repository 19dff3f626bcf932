//! Machine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for a machine and the clock driving its timers.
///
/// Every field has a default, so partial configurations deserialize.
///
/// # Example
///
/// ```rust
/// use tandem::MachineConfig;
/// use std::time::Duration;
///
/// let config = MachineConfig::default().with_tick_period(Duration::from_millis(250));
/// assert_eq!(config.max_autonomous_leaves, 64);
/// assert_eq!(config.tick_period(), Duration::from_millis(250));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Autonomous leaves allowed in one settling pass before the machine
    /// reports a deadlock.
    pub max_autonomous_leaves: usize,

    /// Transition records kept in the history.
    pub history_capacity: usize,

    /// Period of the timer clock, in milliseconds.
    pub tick_period_ms: u64,
}

impl MachineConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn with_max_autonomous_leaves(mut self, max: usize) -> Self {
        self.max_autonomous_leaves = max;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_autonomous_leaves: 64,
            history_capacity: 256,
            tick_period_ms: 1000,
        }
    }
}
