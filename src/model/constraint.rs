//! Constraints over named variables.

use super::domain::Value;
use super::state::CspState;
use crate::error::{CspError, Result};
use std::fmt;
use std::sync::Arc;

type BinaryPredicate<V> = Arc<dyn Fn(&V, &V) -> bool + Send + Sync>;
type GlobalPredicate<V> = Arc<dyn Fn(&Bindings<'_, V>) -> bool + Send + Sync>;

/// A constraint in a CSP.
///
/// Closed set of two variants with one evaluation contract, see
/// [`Constraint::check`].
#[derive(Clone)]
pub enum Constraint<V: Value> {
    /// Predicate over the values of two variables.
    Binary(BinaryConstraint<V>),
    /// Predicate over the bound subset of an ordered scope.
    Global(GlobalConstraint<V>),
}

impl<V: Value> Constraint<V> {
    /// Convenience: a binary constraint `predicate(value_i, value_j)`.
    pub fn binary(
        var_i: impl Into<String>,
        var_j: impl Into<String>,
        predicate: impl Fn(&V, &V) -> bool + Send + Sync + 'static,
        description: impl Into<String>,
    ) -> Self {
        Constraint::Binary(BinaryConstraint::new(var_i, var_j, predicate, description))
    }

    /// Convenience: a global constraint over `scope`.
    pub fn global<S: Into<String>>(
        scope: impl IntoIterator<Item = S>,
        coverage: Coverage,
        predicate: impl Fn(&Bindings<'_, V>) -> bool + Send + Sync + 'static,
        description: impl Into<String>,
    ) -> Self {
        Constraint::Global(GlobalConstraint::new(
            scope,
            coverage,
            predicate,
            description,
        ))
    }

    /// Names of the referenced variables, in declaration order.
    pub fn variable_names(&self) -> Vec<&str> {
        match self {
            Constraint::Binary(c) => {
                if c.var_i == c.var_j {
                    vec![c.var_i.as_str()]
                } else {
                    vec![c.var_i.as_str(), c.var_j.as_str()]
                }
            }
            Constraint::Global(c) => c.scope.iter().map(String::as_str).collect(),
        }
    }

    /// Whether `name` is referenced.
    pub fn involves(&self, name: &str) -> bool {
        match self {
            Constraint::Binary(c) => c.var_i == name || c.var_j == name,
            Constraint::Global(c) => c.scope.iter().any(|s| s == name),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Constraint::Binary(c) => &c.description,
            Constraint::Global(c) => &c.description,
        }
    }

    /// Whether enough of the referenced variables are assigned in `state`
    /// for an evaluation against the current assignment to be meaningful.
    ///
    /// Binary: both assigned. Global: depends on its [`Coverage`].
    pub fn is_ready(&self, state: &CspState<V>) -> Result<bool> {
        match self {
            Constraint::Binary(c) => Ok(state.variable(&c.var_i)?.is_assigned()
                && state.variable(&c.var_j)?.is_assigned()),
            Constraint::Global(c) => c.is_ready(state),
        }
    }

    /// Evaluates the constraint with at most one hypothetical value.
    ///
    /// `overriding = Some((name, value))` stands in for the assignment of
    /// `name`; every other referenced variable uses its assigned value.
    pub fn check(&self, state: &CspState<V>, overriding: Option<(&str, &V)>) -> Result<bool> {
        match self {
            Constraint::Binary(c) => match overriding {
                Some((name, value)) => c.check(
                    state,
                    (name == c.var_i).then_some(value),
                    (name == c.var_j).then_some(value),
                ),
                None => c.check(state, None, None),
            },
            Constraint::Global(c) => c.check(state, overriding),
        }
    }
}

impl<V: Value> fmt::Display for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Binary(c) => write!(f, "Binary constraint: {}", c.description),
            Constraint::Global(c) => write!(f, "Global constraint: {}", c.description),
        }
    }
}

impl<V: Value> fmt::Debug for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Binary(c) => fmt::Debug::fmt(c, f),
            Constraint::Global(c) => fmt::Debug::fmt(c, f),
        }
    }
}

impl<V: Value> From<BinaryConstraint<V>> for Constraint<V> {
    fn from(c: BinaryConstraint<V>) -> Self {
        Constraint::Binary(c)
    }
}

impl<V: Value> From<GlobalConstraint<V>> for Constraint<V> {
    fn from(c: GlobalConstraint<V>) -> Self {
        Constraint::Global(c)
    }
}

/// `predicate(value_i, value_j)` over two named variables.
///
/// Both names may be equal, which expresses a unary restriction
/// evaluated as `predicate(value, value)`.
#[derive(Clone)]
pub struct BinaryConstraint<V: Value> {
    var_i: String,
    var_j: String,
    predicate: BinaryPredicate<V>,
    description: String,
}

impl<V: Value> BinaryConstraint<V> {
    pub fn new(
        var_i: impl Into<String>,
        var_j: impl Into<String>,
        predicate: impl Fn(&V, &V) -> bool + Send + Sync + 'static,
        description: impl Into<String>,
    ) -> Self {
        Self {
            var_i: var_i.into(),
            var_j: var_j.into(),
            predicate: Arc::new(predicate),
            description: description.into(),
        }
    }

    pub fn variable_i_name(&self) -> &str {
        &self.var_i
    }

    pub fn variable_j_name(&self) -> &str {
        &self.var_j
    }

    /// The variable on the other side of `name`, if `name` is referenced.
    pub fn other(&self, name: &str) -> Option<&str> {
        if self.var_i == name {
            Some(self.var_j.as_str())
        } else if self.var_j == name {
            Some(self.var_i.as_str())
        } else {
            None
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Applies the predicate.
    ///
    /// A `None` argument is replaced by the value currently assigned to that
    /// variable in `state`.
    ///
    /// # Errors
    ///
    /// [`CspError::Unassigned`] if a `None` argument refers to an unassigned
    /// variable, [`CspError::UnknownVariable`] if a name is not in `state`.
    pub fn check(&self, state: &CspState<V>, value_i: Option<&V>, value_j: Option<&V>) -> Result<bool> {
        let value_i = match value_i {
            Some(v) => v,
            None => resolve(state, &self.var_i)?,
        };
        let value_j = match value_j {
            Some(v) => v,
            None => resolve(state, &self.var_j)?,
        };
        Ok((self.predicate)(value_i, value_j))
    }

    /// Evaluates with `fixed` bound to `fixed_value` and the other side set
    /// to `other_value`, respecting argument orientation.
    pub(crate) fn check_against(
        &self,
        state: &CspState<V>,
        fixed: &str,
        fixed_value: Option<&V>,
        other_value: &V,
    ) -> Result<bool> {
        if self.var_i == fixed {
            self.check(state, fixed_value, Some(other_value))
        } else {
            self.check(state, Some(other_value), fixed_value)
        }
    }
}

impl<V: Value> fmt::Debug for BinaryConstraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryConstraint")
            .field("var_i", &self.var_i)
            .field("var_j", &self.var_j)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

fn resolve<'s, V: Value>(state: &'s CspState<V>, name: &str) -> Result<&'s V> {
    state
        .variable(name)?
        .assigned_value()
        .ok_or_else(|| CspError::Unassigned(name.to_owned()))
}

/// How a global constraint treats a scope that is only partly bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// The predicate judges any non-empty subset of the scope.
    ///
    /// Lets checkers reject a branch before the whole scope is assigned.
    Partial,
    /// The predicate only sees fully bound scopes; anything less is
    /// vacuously satisfied.
    Complete,
}

/// `predicate(bindings)` over an ordered scope of variables.
#[derive(Clone)]
pub struct GlobalConstraint<V: Value> {
    scope: Vec<String>,
    coverage: Coverage,
    predicate: GlobalPredicate<V>,
    description: String,
}

impl<V: Value> GlobalConstraint<V> {
    pub fn new<S: Into<String>>(
        scope: impl IntoIterator<Item = S>,
        coverage: Coverage,
        predicate: impl Fn(&Bindings<'_, V>) -> bool + Send + Sync + 'static,
        description: impl Into<String>,
    ) -> Self {
        Self {
            scope: scope.into_iter().map(Into::into).collect(),
            coverage,
            predicate: Arc::new(predicate),
            description: description.into(),
        }
    }

    pub fn variable_names(&self) -> &[String] {
        &self.scope
    }

    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    fn is_ready(&self, state: &CspState<V>) -> Result<bool> {
        let mut assigned = 0;
        for name in &self.scope {
            if state.variable(name)?.is_assigned() {
                assigned += 1;
            }
        }
        Ok(match self.coverage {
            Coverage::Partial => assigned > 0,
            Coverage::Complete => assigned == self.scope.len(),
        })
    }

    /// Applies the predicate to the bound part of the scope.
    ///
    /// Bindings are collected from the variables assigned in `state`. An
    /// override `(name, value)` for a scope variable takes precedence over
    /// its assignment; an override outside the scope is ignored.
    ///
    /// With [`Coverage::Complete`], an incomplete binding set passes
    /// without consulting the predicate.
    ///
    /// # Errors
    ///
    /// [`CspError::EmptyBindings`] if nothing in the scope is bound.
    pub fn check(&self, state: &CspState<V>, overriding: Option<(&str, &V)>) -> Result<bool> {
        let mut entries = Vec::with_capacity(self.scope.len());
        for name in &self.scope {
            match overriding {
                Some((o_name, o_value)) if o_name == name => entries.push((name.as_str(), o_value)),
                _ => {
                    if let Some(value) = state.variable(name)?.assigned_value() {
                        entries.push((name.as_str(), value));
                    }
                }
            }
        }

        if entries.is_empty() {
            return Err(CspError::EmptyBindings(self.description.clone()));
        }

        let bindings = Bindings {
            entries,
            scope_len: self.scope.len(),
        };
        if self.coverage == Coverage::Complete && !bindings.is_complete() {
            return Ok(true);
        }
        Ok((self.predicate)(&bindings))
    }
}

impl<V: Value> fmt::Debug for GlobalConstraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalConstraint")
            .field("scope", &self.scope)
            .field("coverage", &self.coverage)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The bound subset of a global constraint's scope, in scope order.
#[derive(Debug, Clone)]
pub struct Bindings<'a, V> {
    entries: Vec<(&'a str, &'a V)>,
    scope_len: usize,
}

impl<'a, V> Bindings<'a, V> {
    /// Value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&'a V> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a V)> + '_ {
        self.entries.iter().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &'a V> + '_ {
        self.entries.iter().map(|&(_, v)| v)
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the constraint's scope.
    pub fn scope_len(&self) -> usize {
        self.scope_len
    }

    /// Whether every scope variable is bound.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.scope_len
    }
}

/// Pairwise `!=` binary constraints over `names`.
pub fn all_different<V: Value>(names: &[&str]) -> Vec<Constraint<V>> {
    let mut constraints = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            constraints.push(Constraint::binary(
                *a,
                *b,
                |x: &V, y: &V| x != y,
                format!("{a} != {b}"),
            ));
        }
    }
    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Csp, Variable};

    fn abc_state() -> CspState<i32> {
        let csp = Csp::new(
            all_different(&["a", "b", "c"]),
            vec![
                Variable::new("a", [1, 2, 3]),
                Variable::new("b", [1, 2, 3]),
                Variable::new("c", [1, 2, 3]),
            ],
        )
        .unwrap();
        csp.initial_state()
    }

    fn sum_at_most(limit: i32, coverage: Coverage) -> GlobalConstraint<i32> {
        GlobalConstraint::new(
            ["a", "b", "c"],
            coverage,
            move |b: &Bindings<'_, i32>| b.values().sum::<i32>() <= limit,
            format!("sum <= {limit}"),
        )
    }

    #[test]
    fn test_binary_uses_assigned_values() {
        let mut state = abc_state();
        state.commit(1).unwrap();
        state.commit(1).unwrap();

        let c = BinaryConstraint::new("a", "b", |x: &i32, y: &i32| x != y, "a != b");
        assert!(!c.check(&state, None, None).unwrap());
        assert!(c.check(&state, None, Some(&2)).unwrap());
        assert!(c.check(&state, Some(&3), None).unwrap());
    }

    #[test]
    fn test_binary_unassigned_is_error() {
        let state = abc_state();
        let c = BinaryConstraint::new("a", "b", |x: &i32, y: &i32| x < y, "a < b");
        assert_eq!(
            c.check(&state, None, Some(&1)),
            Err(CspError::Unassigned("a".into()))
        );
    }

    #[test]
    fn test_binary_orientation() {
        let mut state = abc_state();
        state.commit(2).unwrap();

        let c = BinaryConstraint::new("b", "a", |b: &i32, a: &i32| b > a, "b > a");
        assert!(c.check_against(&state, "a", None, &3).unwrap());
        assert!(!c.check_against(&state, "a", None, &1).unwrap());
        assert_eq!(c.other("a"), Some("b"));
        assert_eq!(c.other("z"), None);
    }

    #[test]
    fn test_unary_override_fills_both_sides() {
        let state = abc_state();
        let c: Constraint<i32> =
            Constraint::binary("a", "a", |x: &i32, y: &i32| x == y && *x > 1, "a > 1");
        assert!(c.check(&state, Some(("a", &2))).unwrap());
        assert!(!c.check(&state, Some(("a", &1))).unwrap());
        assert_eq!(
            c.check(&state, None),
            Err(CspError::Unassigned("a".into()))
        );
    }

    #[test]
    fn test_global_empty_bindings_is_error() {
        let state = abc_state();
        let c = sum_at_most(4, Coverage::Partial);
        assert_eq!(
            c.check(&state, None),
            Err(CspError::EmptyBindings("sum <= 4".into()))
        );
    }

    #[test]
    fn test_global_partial_judges_subset() {
        let mut state = abc_state();
        state.commit(3).unwrap();
        state.commit(2).unwrap();

        let partial = sum_at_most(4, Coverage::Partial);
        assert!(!partial.check(&state, None).unwrap());

        let complete = sum_at_most(4, Coverage::Complete);
        assert!(complete.check(&state, None).unwrap());
    }

    #[test]
    fn test_global_all_assigned() {
        let mut state = abc_state();
        state.commit(1).unwrap();
        state.commit(2).unwrap();
        state.commit(3).unwrap();

        assert!(sum_at_most(6, Coverage::Complete).check(&state, None).unwrap());
        assert!(!sum_at_most(5, Coverage::Complete).check(&state, None).unwrap());
        assert!(!sum_at_most(5, Coverage::Partial).check(&state, None).unwrap());
    }

    #[test]
    fn test_global_override_wins() {
        let mut state = abc_state();
        state.commit(1).unwrap();
        state.commit(1).unwrap();

        let c = sum_at_most(4, Coverage::Complete);
        assert!(c.check(&state, Some(("c", &2))).unwrap());
        assert!(!c.check(&state, Some(("c", &3))).unwrap());
        let partial = sum_at_most(3, Coverage::Partial);
        assert!(partial.check(&state, None).unwrap());
        assert!(!partial.check(&state, Some(("a", &3))).unwrap());
    }

    #[test]
    fn test_global_override_only() {
        let state = abc_state();
        let c = sum_at_most(2, Coverage::Partial);
        assert!(c.check(&state, Some(("b", &2))).unwrap());
        assert!(!c.check(&state, Some(("b", &3))).unwrap());
        assert!(c.check(&state, Some(("zz", &3))).is_err());
    }

    #[test]
    fn test_constraint_metadata() {
        let c: Constraint<i32> = Constraint::binary("x", "y", |a, b| a < b, "x < y");
        assert_eq!(c.variable_names(), vec!["x", "y"]);
        assert!(c.involves("y"));
        assert!(!c.involves("z"));
        assert_eq!(c.to_string(), "Binary constraint: x < y");

        let g: Constraint<i32> = sum_at_most(3, Coverage::Partial).into();
        assert_eq!(g.variable_names(), vec!["a", "b", "c"]);
        assert_eq!(g.to_string(), "Global constraint: sum <= 3");

        let unary: Constraint<i32> = Constraint::binary("x", "x", |a, _| *a > 0, "x > 0");
        assert_eq!(unary.variable_names(), vec!["x"]);
    }

    #[test]
    fn test_all_different_pairs() {
        let cs: Vec<Constraint<i32>> = all_different(&["a", "b", "c", "d"]);
        assert_eq!(cs.len(), 6);
        assert_eq!(cs[0].description(), "a != b");
    }

    #[test]
    fn test_readiness() {
        let mut state = abc_state();
        let partial: Constraint<i32> = sum_at_most(3, Coverage::Partial).into();
        let complete: Constraint<i32> = sum_at_most(3, Coverage::Complete).into();
        let ab: Constraint<i32> = Constraint::binary("a", "b", |x, y| x != y, "a != b");

        assert!(!partial.is_ready(&state).unwrap());
        state.commit(1).unwrap();
        assert!(partial.is_ready(&state).unwrap());
        assert!(!complete.is_ready(&state).unwrap());
        assert!(!ab.is_ready(&state).unwrap());
        state.commit(2).unwrap();
        assert!(ab.is_ready(&state).unwrap());
    }
}
