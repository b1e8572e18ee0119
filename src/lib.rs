//! Domain-agnostic constraint satisfaction engine.
//!
//! Models a problem as named variables with finite (or lazily generated)
//! domains and constraints over them, then finds assignments with a
//! depth-first backtracking search:
//!
//! - **Model**: [`Variable`](model::Variable), [`Domain`](model::Domain),
//!   binary and global [`Constraint`](model::Constraint)s, the immutable
//!   problem definition [`Csp`](model::Csp) and the per-node
//!   [`CspState`](model::CspState).
//! - **Checking**: pluggable consistency checkers, from plain constraint
//!   evaluation up to forward checking with singleton propagation and
//!   pruning over global constraints.
//! - **Search**: [`solve`] for the first solution and
//!   [`BacktrackRunner`](search::BacktrackRunner) for enumeration, budgets
//!   and cancellation.
//!
//! # Example
//!
//! ```
//! use u_csp::checking::CheckStrategy;
//! use u_csp::model::{all_different, Csp, Variable};
//! use u_csp::search::{BacktrackRunner, SearchConfig, SearchMode};
//!
//! let csp = Csp::new(
//!     all_different(&["x", "y", "z"]),
//!     vec![
//!         Variable::new("x", 1..=3),
//!         Variable::new("y", 1..=3),
//!         Variable::new("z", 1..=3),
//!     ],
//! )
//! .unwrap();
//!
//! let config = SearchConfig::default().with_mode(SearchMode::AllSolutions);
//! let result = BacktrackRunner::run(&csp, &CheckStrategy::ForwardChecking, &config).unwrap();
//! assert_eq!(result.solutions.len(), 6);
//! ```
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade. Search summaries are emitted
//! at `debug`; with `verbose` set, rejected branches and pruned values are
//! traced at `info`. Install any logger (e.g. `env_logger`) to see them.

pub mod checking;
pub mod error;
pub mod model;
pub mod search;

pub use error::{CspError, Result};
pub use search::solve;
