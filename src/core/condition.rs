//! Guard conditions over the variable store.
//!
//! Conditions are pure predicates: evaluating one reads the store and never
//! mutates it. They gate both transitions and state occupancy, and combine
//! with logical AND where an absent condition acts as "always true".

use super::error::GuardError;
use super::value::Value;
use super::variables::Variables;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Ordering test applied between a current reading and an expected value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Equal,
    NotEqual,
    GreaterOrEqual,
    Greater,
}

impl Comparison {
    /// Whether `current <op> expected` holds, given `current.cmp(expected)`.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Less => ordering == Ordering::Less,
            Self::LessOrEqual => ordering != Ordering::Greater,
            Self::Equal => ordering == Ordering::Equal,
            Self::NotEqual => ordering != Ordering::Equal,
            Self::GreaterOrEqual => ordering != Ordering::Less,
            Self::Greater => ordering == Ordering::Greater,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
        };
        f.write_str(symbol)
    }
}

/// Caller-supplied predicate.
pub type Predicate = Arc<dyn Fn(&Variables) -> Result<bool, GuardError> + Send + Sync>;

/// Predicate over a [`Variables`] snapshot.
///
/// # Example
///
/// ```rust
/// use tandem::core::{Comparison, Condition, Variables};
///
/// let vars = Variables::new().with("x", 4);
/// let below_ten = Condition::variable("x", Comparison::Less, 10);
/// let positive = Condition::variable("x", Comparison::Greater, 0);
///
/// assert!(below_ten.and(positive).is_satisfied(&vars).unwrap());
/// ```
#[derive(Clone)]
pub enum Condition {
    Always,
    Timer {
        name: String,
        comparison: Comparison,
        ticks: u64,
    },
    Variable {
        name: String,
        comparison: Comparison,
        value: Value,
    },
    Custom(Predicate),
    And(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// A condition that never blocks.
    pub fn always() -> Self {
        Self::Always
    }

    /// Compare the named timer's ticks against `ticks`.
    pub fn timer(name: impl Into<String>, comparison: Comparison, ticks: u64) -> Self {
        Self::Timer {
            name: name.into(),
            comparison,
            ticks,
        }
    }

    /// Compare the named variable against `value`.
    ///
    /// Evaluation fails if the variable is unset or holds another kind.
    pub fn variable(
        name: impl Into<String>,
        comparison: Comparison,
        value: impl Into<Value>,
    ) -> Self {
        Self::Variable {
            name: name.into(),
            comparison,
            value: value.into(),
        }
    }

    /// Arbitrary predicate, for comparisons the built-in variants can't express.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Variables) -> Result<bool, GuardError> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Conjunction. `Always` on either side is dropped.
    pub fn and(self, other: Condition) -> Self {
        match (self, other) {
            (Self::Always, c) | (c, Self::Always) => c,
            (a, b) => Self::And(Box::new(a), Box::new(b)),
        }
    }

    /// Conjunction of two optional conditions; a missing side is the identity.
    pub fn all(first: Option<&Condition>, second: Option<&Condition>) -> Option<Condition> {
        match (first, second) {
            (None, None) => None,
            (Some(c), None) | (None, Some(c)) => Some(c.clone()),
            (Some(a), Some(b)) => Some(a.clone().and(b.clone())),
        }
    }

    /// Evaluate against a snapshot of the store.
    pub fn is_satisfied(&self, variables: &Variables) -> Result<bool, GuardError> {
        match self {
            Self::Always => Ok(true),
            Self::Timer {
                name,
                comparison,
                ticks,
            } => {
                let current = variables.timer(name)?;
                Ok(comparison.holds(current.cmp(ticks)))
            }
            Self::Variable {
                name,
                comparison,
                value,
            } => {
                let current = variables.value(name)?;
                let ordering =
                    current
                        .compare(value)
                        .ok_or_else(|| GuardError::TypeMismatch {
                            name: name.clone(),
                            expected: value.kind(),
                            found: current.kind(),
                        })?;
                Ok(comparison.holds(ordering))
            }
            Self::Custom(predicate) => predicate(variables),
            Self::And(a, b) => Ok(a.is_satisfied(variables)? && b.is_satisfied(variables)?),
        }
    }

    /// Variables this condition reads, with the value each is compared to.
    ///
    /// Custom predicates are opaque and contribute nothing.
    pub fn referenced_variables(&self) -> Vec<(&str, &Value)> {
        let mut found = Vec::new();
        self.collect_variables(&mut found);
        found
    }

    fn collect_variables<'a>(&'a self, found: &mut Vec<(&'a str, &'a Value)>) {
        match self {
            Self::Variable { name, value, .. } => found.push((name.as_str(), value)),
            Self::And(a, b) => {
                a.collect_variables(found);
                b.collect_variables(found);
            }
            Self::Always | Self::Timer { .. } | Self::Custom(_) => {}
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Timer {
                name,
                comparison,
                ticks,
            } => write!(f, "timer({name}) {comparison} {ticks}"),
            Self::Variable {
                name,
                comparison,
                value,
            } => write!(f, "{name} {comparison} {value}"),
            Self::Custom(_) => f.write_str("<custom>"),
            Self::And(a, b) => write!(f, "({a:?} && {b:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ValueKind;

    #[test]
    fn always_is_satisfied() {
        assert!(Condition::always()
            .is_satisfied(&Variables::new())
            .unwrap());
    }

    #[test]
    fn comparison_table() {
        use Ordering::*;
        assert!(Comparison::Less.holds(Less));
        assert!(!Comparison::Less.holds(Equal));
        assert!(Comparison::LessOrEqual.holds(Equal));
        assert!(!Comparison::LessOrEqual.holds(Greater));
        assert!(Comparison::Equal.holds(Equal));
        assert!(Comparison::NotEqual.holds(Greater));
        assert!(Comparison::GreaterOrEqual.holds(Equal));
        assert!(Comparison::Greater.holds(Greater));
        assert!(!Comparison::Greater.holds(Less));
    }

    #[test]
    fn variable_condition_compares_current_value() {
        let cond = Condition::variable("x", Comparison::Less, 10);

        assert!(cond.is_satisfied(&Variables::new().with("x", 3)).unwrap());
        assert!(!cond.is_satisfied(&Variables::new().with("x", 20)).unwrap());
    }

    #[test]
    fn variable_condition_orders_strings() {
        let cond = Condition::variable("name", Comparison::GreaterOrEqual, "m");
        assert!(cond
            .is_satisfied(&Variables::new().with("name", "zeta"))
            .unwrap());
        assert!(!cond
            .is_satisfied(&Variables::new().with("name", "alpha"))
            .unwrap());
    }

    #[test]
    fn variable_condition_rejects_other_kind() {
        let cond = Condition::variable("x", Comparison::Equal, 1);
        let err = cond
            .is_satisfied(&Variables::new().with("x", "one"))
            .unwrap_err();

        assert_eq!(
            err,
            GuardError::TypeMismatch {
                name: "x".to_string(),
                expected: ValueKind::Int,
                found: ValueKind::Str,
            }
        );
    }

    #[test]
    fn variable_condition_rejects_unset() {
        let cond = Condition::variable("missing", Comparison::Equal, true);
        assert!(matches!(
            cond.is_satisfied(&Variables::new()),
            Err(GuardError::UnsetVariable { .. })
        ));
    }

    #[test]
    fn timer_condition_reads_ticks() {
        let mut vars = Variables::new();
        vars.reset_timer("t");
        let cond = Condition::timer("t", Comparison::GreaterOrEqual, 2);

        assert!(!cond.is_satisfied(&vars).unwrap());
        vars.tick();
        vars.tick();
        assert!(cond.is_satisfied(&vars).unwrap());
    }

    #[test]
    fn timer_condition_requires_registration() {
        let cond = Condition::timer("t", Comparison::Less, 5);
        assert!(matches!(
            cond.is_satisfied(&Variables::new()),
            Err(GuardError::UnregisteredTimer { .. })
        ));
    }

    #[test]
    fn and_requires_both_sides() {
        let vars = Variables::new().with("a", 1).with("b", 2);
        let a = Condition::variable("a", Comparison::Equal, 1);
        let b = Condition::variable("b", Comparison::Equal, 3);

        assert!(!a.clone().and(b).is_satisfied(&vars).unwrap());
        assert!(a.and(Condition::always()).is_satisfied(&vars).unwrap());
    }

    #[test]
    fn all_treats_missing_side_as_identity() {
        let vars = Variables::new().with("a", 1);
        let a = Condition::variable("a", Comparison::Equal, 1);

        assert!(Condition::all(None, None).is_none());
        assert!(Condition::all(Some(&a), None)
            .unwrap()
            .is_satisfied(&vars)
            .unwrap());
        assert!(Condition::all(None, Some(&a))
            .unwrap()
            .is_satisfied(&vars)
            .unwrap());
    }

    #[test]
    fn custom_predicate_can_use_typed_reads() {
        let even = Condition::custom(|vars| Ok(vars.int("n")? % 2 == 0));

        assert!(even.is_satisfied(&Variables::new().with("n", 4)).unwrap());
        assert!(!even.is_satisfied(&Variables::new().with("n", 5)).unwrap());
        assert!(even.is_satisfied(&Variables::new()).is_err());
    }

    #[test]
    fn referenced_variables_walks_conjunctions() {
        let cond = Condition::variable("a", Comparison::Less, 1)
            .and(Condition::timer("t", Comparison::Less, 1))
            .and(Condition::variable("b", Comparison::Equal, "x"));

        let names: Vec<&str> = cond
            .referenced_variables()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let vars = Variables::new().with("x", 7);
        let cond = Condition::variable("x", Comparison::NotEqual, 7);
        assert_eq!(cond.is_satisfied(&vars), cond.is_satisfied(&vars));
    }
}
