//! CSP modeling layer.
//!
//! Describes a problem as named variables with finite domains plus
//! constraints over them, and provides the search-tree node type that the
//! checkers and the search driver operate on.
//!
//! # Key Components
//!
//! - **Domains**: [`Domain`], explicit (persistent vector) or generated
//! - **Variables**: [`Variable`], name, domain, optional assigned value
//! - **Constraints**: [`Constraint`], [`BinaryConstraint`] or [`GlobalConstraint`]
//! - **Problem**: [`Csp`], immutable definition, manufactures root states
//! - **State**: [`CspState`], one node of the search tree
//!
//! # Branch isolation
//!
//! Checkers prune domains as a side effect. Every state owns its variables,
//! and domains are persistent vectors, so cloning a state is cheap and a
//! pruned value never disappears from a sibling branch.
//!
//! # References
//!
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! ch. 6

mod assignment;
mod combinations;
mod constraint;
mod domain;
mod problem;
mod state;
mod variable;

pub use assignment::Assignment;
pub use combinations::{Category, PartitionedCombinations};
pub use constraint::{
    all_different, BinaryConstraint, Bindings, Constraint, Coverage, GlobalConstraint,
};
pub use domain::{Domain, Value};
pub use problem::Csp;
pub use state::{CspState, Phase};
pub use variable::Variable;
