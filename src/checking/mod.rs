//! Consistency checking strategies.
//!
//! A checker runs after every commit of the search driver and decides
//! whether the new state can still be extended to a solution. Stronger
//! checkers also prune candidates from the domains of unassigned
//! variables, which shrinks the tree the driver has to explore.
//!
//! | Checker | Evaluates | Prunes |
//! |---|---|---|
//! | [`no_checker`] | nothing | no |
//! | [`basic_constraint_checker`] | bound constraints | no |
//! | [`global_constraint_checker`] | bound global constraints | no |
//! | [`forward_checking`] | bound constraints | binary neighbors of the committed variable |
//! | [`forward_checking_with_singleton_propagation`] | bound constraints | as above, cascading through singletons |
//! | [`global_forward_checking`] | bound constraints | scopes of global constraints |
//!
//! Every checker is a plain function satisfying [`ConsistencyChecker`];
//! [`CheckStrategy`] names them for configuration.
//!
//! # References
//!
//! Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//! Constraint Satisfaction Problems"

mod basic;
mod forward;
mod global;
mod types;

pub use basic::{basic_constraint_checker, global_constraint_checker, no_checker};
pub use forward::{forward_checking, forward_checking_with_singleton_propagation};
pub use global::global_forward_checking;
pub use types::{CheckStrategy, ConsistencyChecker};
