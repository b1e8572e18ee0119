//! Forward checking over binary constraints.

use super::basic::basic_constraint_checker;
use crate::error::Result;
use crate::model::{BinaryConstraint, Constraint, CspState, Value};
use log::info;
use std::collections::VecDeque;

/// Basic check, then prune the binary neighbors of the committed variable.
///
/// With `x = a` the variable just committed, every candidate `y` of a
/// variable sharing a binary constraint with `x` is removed if the pair
/// `(a, y)` violates that constraint. Returns `false` as soon as a domain
/// runs empty. Nothing is assigned. Global constraints only take part
/// through the basic check.
pub fn forward_checking<V: Value>(state: &mut CspState<V>, verbose: bool) -> Result<bool> {
    if !basic_constraint_checker(state, verbose)? {
        return Ok(false);
    }
    let Some(current) = state.current_variable_name().map(str::to_owned) else {
        return Ok(true);
    };

    let index = state.index();
    let pos = index.position(&current)?;
    for constraint in index.constraints_at(pos) {
        let Constraint::Binary(c) = constraint else {
            continue;
        };
        let Some(other) = c.other(&current) else {
            continue;
        };
        if other == current {
            continue;
        }
        let other_pos = index.position(other)?;
        if prune(state, c, &current, None, other_pos, verbose)? == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Forward checking, then propagation through singleton domains.
///
/// Every variable left with exactly one candidate is queued. A dequeued
/// variable's sole candidate is treated as its value and prunes its binary
/// neighbors the same way [`forward_checking`] does; neighbors that become
/// singletons are queued in turn. A variable is queued at most once per
/// call, so the loop runs at most once per variable. Returns `false` as
/// soon as a domain runs empty.
pub fn forward_checking_with_singleton_propagation<V: Value>(
    state: &mut CspState<V>,
    verbose: bool,
) -> Result<bool> {
    if !forward_checking(state, verbose)? {
        return Ok(false);
    }

    let index = state.index();
    let mut visited = vec![false; state.variable_count()];
    let mut queue = VecDeque::new();
    for (pos, var) in state.variables().iter().enumerate() {
        if var.domain_size() == 1 {
            visited[pos] = true;
            queue.push_back(pos);
        }
    }

    while let Some(pos) = queue.pop_front() {
        let Some(value) = state.variable_at(pos).singleton_value() else {
            continue;
        };
        let name = index.order()[pos].as_str();
        for constraint in index.constraints_at(pos) {
            let Constraint::Binary(c) = constraint else {
                continue;
            };
            let Some(other) = c.other(name) else {
                continue;
            };
            if other == name {
                continue;
            }
            let other_pos = index.position(other)?;
            let remaining = prune(state, c, name, Some(&value), other_pos, verbose)?;
            if remaining == 0 {
                return Ok(false);
            }
            if !visited[other_pos] && remaining == 1 {
                visited[other_pos] = true;
                queue.push_back(other_pos);
            }
        }
    }
    Ok(true)
}

/// Removes from the variable at `other_pos` every candidate that violates
/// `c` together with `fixed = fixed_value` (its assignment when `None`).
/// Returns how many candidates are left.
fn prune<V: Value>(
    state: &mut CspState<V>,
    c: &BinaryConstraint<V>,
    fixed: &str,
    fixed_value: Option<&V>,
    other_pos: usize,
    verbose: bool,
) -> Result<usize> {
    let candidates = state.variable_at(other_pos).domain();
    let mut rejected = Vec::new();
    for candidate in &candidates {
        if !c.check_against(state, fixed, fixed_value, candidate)? {
            rejected.push(candidate.clone());
        }
    }

    let remaining = candidates.len() - rejected.len();
    if rejected.is_empty() {
        return Ok(remaining);
    }
    let var = state.variable_at_mut(other_pos);
    var.reduce_domain_all(&rejected)?;
    if verbose {
        for value in &rejected {
            info!("PRUNED: {} = {value:?} ({})", var.name(), c.description());
        }
        if remaining == 0 {
            info!("DOMAIN-EMPTY: {}", var.name());
        }
    }
    Ok(remaining)
}
