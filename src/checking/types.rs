//! Checker contract and the built-in strategy selector.

use super::{
    basic_constraint_checker, forward_checking, forward_checking_with_singleton_propagation,
    global_constraint_checker, global_forward_checking, no_checker,
};
use crate::error::Result;
use crate::model::{CspState, Value};

/// A consistency check run by the search driver after every commit.
///
/// Returns `Ok(true)` if `state` may still lead to a solution and
/// `Ok(false)` to reject the branch. Implementations may prune domains of
/// `state`; the driver guarantees that `state` is a private copy. `Err` is
/// reserved for unrecoverable usage errors and aborts the search.
///
/// `verbose` only controls tracing through the `log` facade and must not
/// change the outcome.
///
/// Any `Fn(&mut CspState<V>, bool) -> Result<bool>` is a checker, so the
/// free functions of this module and caller closures can be passed
/// directly.
pub trait ConsistencyChecker<V: Value> {
    fn check(&self, state: &mut CspState<V>, verbose: bool) -> Result<bool>;
}

impl<V, F> ConsistencyChecker<V> for F
where
    V: Value,
    F: Fn(&mut CspState<V>, bool) -> Result<bool>,
{
    fn check(&self, state: &mut CspState<V>, verbose: bool) -> Result<bool> {
        self(state, verbose)
    }
}

/// Built-in checking strategies, weakest to strongest pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckStrategy {
    /// Accept every state; search degenerates to generate-and-test.
    NoCheck,
    /// Evaluate constraints whose variables are bound; no pruning.
    Basic,
    /// Evaluate global constraints only.
    Global,
    /// Basic check plus pruning of binary neighbors of the committed variable.
    #[default]
    ForwardChecking,
    /// Forward checking, then cascade through singleton domains.
    SingletonPropagation,
    /// Basic check plus pruning of every global constraint's scope.
    GlobalForwardChecking,
}

impl CheckStrategy {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CheckStrategy::NoCheck => "none",
            CheckStrategy::Basic => "basic",
            CheckStrategy::Global => "global",
            CheckStrategy::ForwardChecking => "forward-checking",
            CheckStrategy::SingletonPropagation => "singleton-propagation",
            CheckStrategy::GlobalForwardChecking => "global-forward-checking",
        }
    }
}

impl<V: Value> ConsistencyChecker<V> for CheckStrategy {
    fn check(&self, state: &mut CspState<V>, verbose: bool) -> Result<bool> {
        match self {
            CheckStrategy::NoCheck => no_checker(state, verbose),
            CheckStrategy::Basic => basic_constraint_checker(state, verbose),
            CheckStrategy::Global => global_constraint_checker(state, verbose),
            CheckStrategy::ForwardChecking => forward_checking(state, verbose),
            CheckStrategy::SingletonPropagation => {
                forward_checking_with_singleton_propagation(state, verbose)
            }
            CheckStrategy::GlobalForwardChecking => global_forward_checking(state, verbose),
        }
    }
}
