//! Search results and node classification.

use crate::model::Assignment;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a search-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Nothing committed.
    Root,
    /// Consistent, with variables left to commit.
    Partial,
    /// Consistent and fully committed.
    Solved,
    /// The checker refused the node.
    Rejected,
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchOutcome {
    /// At least one solution found and the search mode is satisfied, or the
    /// tree was exhausted after finding some.
    Solved,
    /// The tree was exhausted without a solution.
    Exhausted,
    /// The node or time budget ran out first.
    BudgetExceeded,
    /// Stopped through the cancellation flag.
    Cancelled,
}

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Commits performed (nodes below the root).
    pub nodes: usize,
    /// Nodes refused by the checker, the root included.
    pub rejected: usize,
    /// Frames abandoned after their last candidate.
    pub backtracks: usize,
    /// Deepest committed depth reached.
    pub max_depth: usize,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of a backtracking search.
#[derive(Debug, Clone)]
pub struct SearchResult<V> {
    /// Why the search stopped.
    pub outcome: SearchOutcome,
    /// Solutions in discovery order.
    pub solutions: Vec<Assignment<V>>,
    /// Search counters.
    pub stats: SearchStats,
}

impl<V> SearchResult<V> {
    /// Whether a solution was found.
    pub fn is_solution_found(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// First solution in discovery order.
    pub fn first(&self) -> Option<&Assignment<V>> {
        self.solutions.first()
    }

    pub fn into_first(self) -> Option<Assignment<V>> {
        self.solutions.into_iter().next()
    }
}
