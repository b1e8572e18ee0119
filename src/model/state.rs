//! Search-tree nodes.

use super::assignment::Assignment;
use super::constraint::Constraint;
use super::domain::Value;
use super::problem::ProblemIndex;
use super::variable::Variable;
use crate::error::{CspError, Result};
use std::sync::Arc;

/// Where a state sits in the search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing committed yet.
    Root,
    /// Some, but not all, variables committed.
    Partial,
    /// Every variable committed.
    Complete,
}

/// One node of the search tree.
///
/// Owns a private copy of every variable; only the problem's lookup tables
/// are shared. The cursor counts how many variables of the fixed order
/// have been committed and never decreases. To branch, clone the state and
/// commit on the clone.
///
/// # Examples
///
/// ```
/// use u_csp::model::{Csp, Phase, Variable};
///
/// let csp = Csp::new(Vec::new(), vec![Variable::new("x", [1, 2])]).unwrap();
/// let root = csp.initial_state();
/// assert_eq!(root.phase(), Phase::Root);
///
/// let mut child = root.clone();
/// child.commit(2).unwrap();
/// assert_eq!(child.current_variable_name(), Some("x"));
/// assert_eq!(child.phase(), Phase::Complete);
/// assert!(root.current_variable_name().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CspState<V: Value> {
    variables: Vec<Variable<V>>,
    index: Arc<ProblemIndex<V>>,
    committed: usize,
}

impl<V: Value> CspState<V> {
    pub(crate) fn new(variables: Vec<Variable<V>>, index: Arc<ProblemIndex<V>>) -> Self {
        Self {
            variables,
            index,
            committed: 0,
        }
    }

    /// Name of the most recently committed variable; `None` at the root.
    pub fn current_variable_name(&self) -> Option<&str> {
        self.committed
            .checked_sub(1)
            .map(|pos| self.index.order()[pos].as_str())
    }

    /// The most recently committed variable; `None` at the root.
    pub fn current_variable(&self) -> Option<&Variable<V>> {
        self.committed.checked_sub(1).map(|pos| &self.variables[pos])
    }

    /// The variable the next commit will assign.
    pub fn next_variable(&self) -> Option<&Variable<V>> {
        self.variables.get(self.committed)
    }

    /// # Errors
    ///
    /// [`CspError::UnknownVariable`] if `name` is not in the problem.
    pub fn variable(&self, name: &str) -> Result<&Variable<V>> {
        let pos = self.index.position(name)?;
        Ok(&self.variables[pos])
    }

    /// # Errors
    ///
    /// [`CspError::UnknownVariable`] if `name` is not in the problem.
    pub fn variable_mut(&mut self, name: &str) -> Result<&mut Variable<V>> {
        let pos = self.index.position(name)?;
        Ok(&mut self.variables[pos])
    }

    /// Every constraint that references `name`.
    pub fn constraints_for(&self, name: &str) -> Result<Vec<&Constraint<V>>> {
        let pos = self.index.position(name)?;
        Ok(self.index.constraints_at(pos).collect())
    }

    /// All variables, in assignment order.
    pub fn variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint<V>] {
        self.index.constraints()
    }

    /// Variable names in assignment order.
    pub fn order(&self) -> &[String] {
        self.index.order()
    }

    /// Number of committed variables.
    pub fn depth(&self) -> usize {
        self.committed
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn is_complete(&self) -> bool {
        self.committed == self.variables.len()
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            Phase::Complete
        } else if self.committed == 0 {
            Phase::Root
        } else {
            Phase::Partial
        }
    }

    /// Assigns `value` to the next variable in order and advances the cursor.
    ///
    /// The domain is not consulted; the search driver only commits values
    /// from [`Variable::candidates`]. A pre-assigned variable keeps its
    /// value.
    ///
    /// # Errors
    ///
    /// - [`CspError::NothingToCommit`] if every variable is already committed.
    /// - [`CspError::AlreadyAssigned`] if the next variable was pre-assigned
    ///   a different value.
    pub fn commit(&mut self, value: V) -> Result<()> {
        let var = self
            .variables
            .get_mut(self.committed)
            .ok_or(CspError::NothingToCommit)?;
        match var.assigned_value() {
            Some(fixed) if *fixed != value => {
                return Err(CspError::AlreadyAssigned {
                    variable: var.name().to_owned(),
                    fixed: format!("{fixed:?}"),
                    value: format!("{value:?}"),
                });
            }
            Some(_) => {}
            None => var.set_assigned_value(value),
        }
        self.committed += 1;
        Ok(())
    }

    /// Every assigned variable with its value, in assignment order.
    pub fn assignment(&self) -> Assignment<V> {
        Assignment::new(
            self.variables
                .iter()
                .filter_map(|v| v.assigned_value().map(|a| (v.name().to_owned(), a.clone())))
                .collect(),
        )
    }

    /// Shared lookup tables, detached from `self` so that checkers can walk
    /// constraints while mutating domains.
    pub(crate) fn index(&self) -> Arc<ProblemIndex<V>> {
        Arc::clone(&self.index)
    }

    pub(crate) fn variable_at(&self, pos: usize) -> &Variable<V> {
        &self.variables[pos]
    }

    pub(crate) fn variable_at_mut(&mut self, pos: usize) -> &mut Variable<V> {
        &mut self.variables[pos]
    }
}
