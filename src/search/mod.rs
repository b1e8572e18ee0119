//! Depth-first backtracking search.
//!
//! The driver commits variables in problem order, trying the candidates of
//! each domain in order. After every commit the configured
//! [`ConsistencyChecker`](crate::checking::ConsistencyChecker) decides
//! whether the branch survives and may prune the domains of later
//! variables. Every child node is an independent copy of its parent, so
//! pruning never leaks into sibling branches.
//!
//! [`solve`] covers the common case of finding one solution;
//! [`BacktrackRunner`] adds solution enumeration, node and time budgets,
//! cancellation and statistics.
//!
//! # References
//!
//! - Golomb & Baumert (1965), "Backtrack Programming"
//! - Bitner & Reingold (1975), "Backtrack Programming Techniques"

mod config;
mod runner;
mod types;

pub use config::{SearchConfig, SearchMode};
pub use runner::{solve, BacktrackRunner};
pub use types::{NodeStatus, SearchOutcome, SearchResult, SearchStats};
