//! Named values and tick counters consulted by guards.
//!
//! The store never talks to a machine. All mutation that must re-check a
//! guard goes through [`FiniteStateMachine`](crate::machine::FiniteStateMachine),
//! which owns its store; transition actions get `&mut Variables` directly
//! while the machine is mid-dispatch and the re-check follows the action.

use super::error::GuardError;
use super::value::{Value, ValueKind};
use std::collections::HashMap;

/// Variable store of a machine.
///
/// # Example
///
/// ```rust
/// use tandem::core::Variables;
///
/// let mut vars = Variables::new().with("coins", 0).with("mode", "idle");
/// assert_eq!(vars.int("coins").unwrap(), 0);
///
/// vars.set("coins", 2);
/// assert_eq!(vars.int("coins").unwrap(), 2);
///
/// vars.reset_timer("elapsed");
/// vars.tick();
/// assert_eq!(vars.timer("elapsed").unwrap(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variables {
    values: HashMap<String, Value>,
    timers: HashMap<String, u64>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Look up a variable.
    pub fn value(&self, name: &str) -> Result<&Value, GuardError> {
        self.values.get(name).ok_or_else(|| GuardError::UnsetVariable {
            name: name.to_string(),
        })
    }

    pub fn int(&self, name: &str) -> Result<i64, GuardError> {
        let value = self.value(name)?;
        value.as_int().ok_or_else(|| mismatch(name, ValueKind::Int, value))
    }

    pub fn string(&self, name: &str) -> Result<&str, GuardError> {
        let value = self.value(name)?;
        value.as_str().ok_or_else(|| mismatch(name, ValueKind::Str, value))
    }

    pub fn boolean(&self, name: &str) -> Result<bool, GuardError> {
        let value = self.value(name)?;
        value.as_bool().ok_or_else(|| mismatch(name, ValueKind::Bool, value))
    }

    /// Current tick count of a timer.
    pub fn timer(&self, name: &str) -> Result<u64, GuardError> {
        self.timers
            .get(name)
            .copied()
            .ok_or_else(|| GuardError::UnregisteredTimer {
                name: name.to_string(),
            })
    }

    /// Overwrite or create a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Register a timer, or restart it at zero.
    pub fn reset_timer(&mut self, name: impl Into<String>) {
        self.timers.insert(name.into(), 0);
    }

    /// Advance every registered timer by one tick.
    pub fn tick(&mut self) {
        for ticks in self.timers.values_mut() {
            *ticks = ticks.saturating_add(1);
        }
    }

    /// Whether any timer has been registered.
    ///
    /// The shared runtime starts its clock the first time this is true.
    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn timer_names(&self) -> impl Iterator<Item = &str> {
        self.timers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Union of two stores.
    ///
    /// Entries of `self` are applied on top of `other`, so `self` wins on a
    /// name collision. Timers follow the same precedence.
    pub fn merge(&self, other: &Variables) -> Variables {
        let mut merged = other.clone();
        merged
            .values
            .extend(self.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
            .timers
            .extend(self.timers.iter().map(|(k, v)| (k.clone(), *v)));
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values,
            timers: HashMap::new(),
        }
    }
}

fn mismatch(name: &str, expected: ValueKind, found: &Value) -> GuardError {
    GuardError::TypeMismatch {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_check_kind() {
        let vars = Variables::new().with("x", 5).with("label", "on");

        assert_eq!(vars.int("x").unwrap(), 5);
        assert_eq!(vars.string("label").unwrap(), "on");
        assert_eq!(
            vars.int("label"),
            Err(GuardError::TypeMismatch {
                name: "label".to_string(),
                expected: ValueKind::Int,
                found: ValueKind::Str,
            })
        );
    }

    #[test]
    fn unset_variable_is_reported() {
        let vars = Variables::new();
        assert!(matches!(
            vars.boolean("armed"),
            Err(GuardError::UnsetVariable { .. })
        ));
    }

    #[test]
    fn unregistered_timer_is_reported() {
        let vars = Variables::new();
        assert_eq!(
            vars.timer("t"),
            Err(GuardError::UnregisteredTimer {
                name: "t".to_string()
            })
        );
    }

    #[test]
    fn tick_advances_all_timers() {
        let mut vars = Variables::new();
        vars.reset_timer("a");
        vars.tick();
        vars.reset_timer("b");
        vars.tick();
        vars.tick();

        assert_eq!(vars.timer("a").unwrap(), 3);
        assert_eq!(vars.timer("b").unwrap(), 2);
    }

    #[test]
    fn reset_restarts_timer_at_zero() {
        let mut vars = Variables::new();
        assert!(!vars.has_timers());

        vars.reset_timer("a");
        vars.tick();
        vars.reset_timer("a");

        assert!(vars.has_timers());
        assert_eq!(vars.timer("a").unwrap(), 0);
    }

    #[test]
    fn merge_prefers_receiver_on_collision() {
        let left = Variables::new().with("shared", 1).with("left", true);
        let right = Variables::new().with("shared", 2).with("right", "r");

        let merged = left.merge(&right);

        assert_eq!(merged.int("shared").unwrap(), 1);
        assert!(merged.boolean("left").unwrap());
        assert_eq!(merged.string("right").unwrap(), "r");
        assert_eq!(merged.len(), 3);

        let reversed = right.merge(&left);
        assert_eq!(reversed.int("shared").unwrap(), 2);
    }

    #[test]
    fn merge_keeps_timers_from_both_sides() {
        let mut left = Variables::new();
        left.reset_timer("l");
        left.tick();
        let mut right = Variables::new();
        right.reset_timer("r");
        right.reset_timer("l");

        let merged = left.merge(&right);

        assert_eq!(merged.timer("l").unwrap(), 1);
        assert_eq!(merged.timer("r").unwrap(), 0);
    }

    #[test]
    fn collects_from_pairs() {
        let vars: Variables = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(vars.len(), 2);
        assert!(vars.contains("a"));
    }
}
