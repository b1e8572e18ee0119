//! Forward checking over global constraints.

use super::basic::basic_constraint_checker;
use crate::error::Result;
use crate::model::{Constraint, CspState, Phase, Value};
use log::info;

/// Basic check, then prune the scope of every global constraint.
///
/// For each variable `v` in a global constraint's scope and each candidate
/// `c` of `v`, the constraint is evaluated with `v` overridden to `c` and
/// `c` is removed on failure. Returns `false` once a scope variable's
/// domain is empty. Binary constraints only take part through the basic
/// check.
///
/// How much this prunes depends on the constraint's coverage: a
/// [`Coverage::Partial`](crate::model::Coverage::Partial) constraint prunes
/// as soon as one other scope variable is assigned, a
/// [`Coverage::Complete`](crate::model::Coverage::Complete) one only when
/// the override completes its scope.
pub fn global_forward_checking<V: Value>(state: &mut CspState<V>, verbose: bool) -> Result<bool> {
    if !basic_constraint_checker(state, verbose)? {
        return Ok(false);
    }
    if state.phase() == Phase::Root {
        return Ok(true);
    }

    let index = state.index();
    for constraint in index.constraints() {
        let Constraint::Global(global) = constraint else {
            continue;
        };
        for name in global.variable_names() {
            let pos = index.position(name)?;
            let candidates = state.variable_at(pos).domain();
            let mut rejected = Vec::new();
            for candidate in &candidates {
                if !global.check(state, Some((name.as_str(), candidate)))? {
                    rejected.push(candidate.clone());
                }
            }
            if !rejected.is_empty() {
                state.variable_at_mut(pos).reduce_domain_all(&rejected)?;
                if verbose {
                    for value in &rejected {
                        info!("PRUNED: {name} = {value:?} ({constraint})");
                    }
                }
            }
            if rejected.len() == candidates.len() {
                if verbose {
                    info!("DOMAIN-EMPTY: {name}");
                }
                return Ok(false);
            }
        }
    }
    Ok(true)
}
