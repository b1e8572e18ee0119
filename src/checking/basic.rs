//! Non-pruning checkers.

use crate::error::Result;
use crate::model::{Constraint, CspState, Phase, Value};
use log::info;

/// Accepts every state.
pub fn no_checker<V: Value>(_state: &mut CspState<V>, _verbose: bool) -> Result<bool> {
    Ok(true)
}

/// Evaluates every constraint whose variables are bound.
///
/// A binary constraint is evaluated once both of its variables are
/// assigned; a global one according to its coverage. Returns `false` on the
/// first violated constraint. Domains are left untouched.
pub fn basic_constraint_checker<V: Value>(state: &mut CspState<V>, verbose: bool) -> Result<bool> {
    let state = &*state;
    for constraint in state.constraints() {
        if constraint.is_ready(state)? && !constraint.check(state, None)? {
            if verbose {
                info!("CONSTRAINT-FAILS: {constraint}");
            }
            return Ok(false);
        }
    }
    Ok(true)
}

/// Evaluates global constraints only; accepts the root unconditionally.
pub fn global_constraint_checker<V: Value>(state: &mut CspState<V>, verbose: bool) -> Result<bool> {
    if state.phase() == Phase::Root {
        return Ok(true);
    }
    let state = &*state;
    for constraint in state.constraints() {
        if !matches!(constraint, Constraint::Global(_)) {
            continue;
        }
        if constraint.is_ready(state)? && !constraint.check(state, None)? {
            if verbose {
                info!("CONSTRAINT-FAILS: {constraint}");
            }
            return Ok(false);
        }
    }
    Ok(true)
}
