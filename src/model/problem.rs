//! CSP problem definition.

use super::constraint::Constraint;
use super::domain::Value;
use super::state::CspState;
use super::variable::Variable;
use crate::error::{CspError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// A constraint satisfaction problem.
///
/// Immutable once built. The variables' initial domains, the assignment
/// order (the order in which variables were passed in) and the constraints
/// are fixed here; every search starts from [`Csp::initial_state`].
///
/// # Examples
///
/// ```
/// use u_csp::model::{all_different, Csp, Variable};
///
/// let csp = Csp::new(
///     all_different(&["a", "b"]),
///     vec![Variable::new("a", [1, 2]), Variable::new("b", [1, 2])],
/// )
/// .unwrap();
/// assert_eq!(csp.variable_count(), 2);
/// assert_eq!(csp.constraint_count(), 1);
///
/// let state = csp.initial_state();
/// assert!(state.current_variable_name().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Csp<V: Value> {
    variables: Vec<Variable<V>>,
    index: Arc<ProblemIndex<V>>,
}

impl<V: Value> Csp<V> {
    /// Builds a problem and its constraint index.
    ///
    /// # Errors
    ///
    /// - [`CspError::DuplicateVariable`] if two variables share a name.
    /// - [`CspError::UnknownVariable`] if a constraint references a name
    ///   that is not a variable.
    /// - [`CspError::EmptyScope`] for a global constraint over nothing.
    pub fn new(constraints: Vec<Constraint<V>>, variables: Vec<Variable<V>>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(variables.len());
        for (pos, var) in variables.iter().enumerate() {
            if positions.insert(var.name().to_owned(), pos).is_some() {
                return Err(CspError::DuplicateVariable(var.name().to_owned()));
            }
        }

        let mut by_variable = vec![Vec::new(); variables.len()];
        for (id, constraint) in constraints.iter().enumerate() {
            let names = constraint.variable_names();
            if names.is_empty() {
                return Err(CspError::EmptyScope(constraint.description().to_owned()));
            }
            for name in names {
                let pos = *positions
                    .get(name)
                    .ok_or_else(|| CspError::UnknownVariable(name.to_owned()))?;
                // A name repeated in one scope is indexed once.
                if by_variable[pos].last() != Some(&id) {
                    by_variable[pos].push(id);
                }
            }
        }

        let order = variables.iter().map(|v| v.name().to_owned()).collect();
        Ok(Self {
            variables,
            index: Arc::new(ProblemIndex {
                positions,
                order,
                constraints,
                by_variable,
            }),
        })
    }

    /// A fresh root state owning its own copy of every variable.
    pub fn initial_state(&self) -> CspState<V> {
        CspState::new(self.variables.clone(), Arc::clone(&self.index))
    }

    pub fn variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint<V>] {
        &self.index.constraints
    }

    /// Variable names in assignment order.
    pub fn order(&self) -> &[String] {
        &self.index.order
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.index.constraints.len()
    }
}

/// Static lookup tables shared by every state of one problem.
#[derive(Debug)]
pub(crate) struct ProblemIndex<V: Value> {
    positions: HashMap<String, usize>,
    order: Vec<String>,
    constraints: Vec<Constraint<V>>,
    by_variable: Vec<Vec<usize>>,
}

impl<V: Value> ProblemIndex<V> {
    pub(crate) fn position(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| CspError::UnknownVariable(name.to_owned()))
    }

    pub(crate) fn order(&self) -> &[String] {
        &self.order
    }

    pub(crate) fn constraints(&self) -> &[Constraint<V>] {
        &self.constraints
    }

    /// Constraints referencing the variable at `pos`.
    pub(crate) fn constraints_at(&self, pos: usize) -> impl Iterator<Item = &Constraint<V>> + '_ {
        self.by_variable[pos].iter().map(move |&id| &self.constraints[id])
    }
}
