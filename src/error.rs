//! Error type shared by the whole crate.
//!
//! Only unrecoverable failures live here: a malformed problem instance or a
//! caller breaking an API invariant. A consistency check that rejects a
//! branch, or a search that finds no solution, is an ordinary result and is
//! never reported through [`CspError`].

use thiserror::Error;

/// Unrecoverable CSP failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CspError {
    /// A value was removed from a domain that does not contain it.
    #[error("value {value} is not in the domain of variable `{variable}`")]
    NotInDomain { variable: String, value: String },

    /// A global constraint was evaluated with no bound variable in its scope.
    #[error("global constraint `{0}` evaluated with no bound variable")]
    EmptyBindings(String),

    /// A binary constraint was asked to use a value that was never assigned.
    #[error("variable `{0}` has no assigned value")]
    Unassigned(String),

    /// A name does not belong to the problem.
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    /// Two variables share one name.
    #[error("duplicate variable `{0}`")]
    DuplicateVariable(String),

    /// A global constraint with nothing in its scope.
    #[error("global constraint `{0}` has an empty scope")]
    EmptyScope(String),

    /// A pre-assigned variable was committed with a different value.
    #[error("variable `{variable}` is fixed to {fixed}, cannot commit {value}")]
    AlreadyAssigned {
        variable: String,
        fixed: String,
        value: String,
    },

    /// An item is not among the base items of a partitioned domain.
    #[error("item {item} is not a base item")]
    UnknownItem { item: String },

    /// A base item fits neither category of a partitioned domain.
    #[error("item {item} belongs to no known category")]
    UnknownCategory { item: String },

    /// `commit` was called on a state with every variable assigned.
    #[error("every variable is already committed")]
    NothingToCommit,

    /// Search configuration rejected by validation.
    #[error("invalid search config: {0}")]
    InvalidConfig(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CspError>;
