//! Backtracking search loop.

use super::config::SearchConfig;
use super::types::{NodeStatus, SearchOutcome, SearchResult, SearchStats};
use crate::checking::ConsistencyChecker;
use crate::error::Result;
use crate::model::{Assignment, Csp, CspState, Value};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Finds the first solution of the problem built by `factory`.
///
/// `Ok(None)` means the search space holds no solution.
///
/// # Examples
///
/// ```
/// use u_csp::checking::forward_checking;
/// use u_csp::model::{all_different, Csp, Variable};
/// use u_csp::search::solve;
///
/// let solution = solve(
///     || {
///         Csp::new(
///             all_different(&["a", "b", "c"]),
///             vec![
///                 Variable::new("a", [1, 2, 3]),
///                 Variable::new("b", [1, 2, 3]),
///                 Variable::new("c", [1, 2, 3]),
///             ],
///         )
///     },
///     &forward_checking,
///     false,
/// )
/// .unwrap()
/// .unwrap();
///
/// assert_eq!(solution.get("a"), Some(&1));
/// assert_eq!(solution.get("b"), Some(&2));
/// assert_eq!(solution.get("c"), Some(&3));
/// ```
pub fn solve<V, F, C>(factory: F, checker: &C, verbose: bool) -> Result<Option<Assignment<V>>>
where
    V: Value,
    F: FnOnce() -> Result<Csp<V>>,
    C: ConsistencyChecker<V> + ?Sized,
{
    let csp = factory()?;
    let config = SearchConfig::default().with_verbose(verbose);
    Ok(BacktrackRunner::run(&csp, checker, &config)?.into_first())
}

/// Executes depth-first backtracking search.
///
/// Variables are committed in problem order and candidates tried in domain
/// order; no ordering heuristic is applied. A pre-assigned variable is
/// only ever committed to its own value. Each child is a clone of its
/// parent, so pruning done by the checker on one branch is invisible to
/// its siblings.
pub struct BacktrackRunner;

/// A node whose children are being expanded.
struct Frame<V: Value> {
    state: CspState<V>,
    candidates: std::vec::IntoIter<V>,
}

impl<V: Value> Frame<V> {
    fn new(state: CspState<V>) -> Self {
        let candidates = state
            .next_variable()
            .map(|v| v.candidates())
            .unwrap_or_default()
            .into_iter();
        Self { state, candidates }
    }
}

impl BacktrackRunner {
    /// Runs the search.
    pub fn run<V, C>(csp: &Csp<V>, checker: &C, config: &SearchConfig) -> Result<SearchResult<V>>
    where
        V: Value,
        C: ConsistencyChecker<V> + ?Sized,
    {
        Self::run_with_cancel(csp, checker, config, None)
    }

    /// Runs the search with an optional cancellation token, polled before
    /// every commit.
    pub fn run_with_cancel<V, C>(
        csp: &Csp<V>,
        checker: &C,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<V>>
    where
        V: Value,
        C: ConsistencyChecker<V> + ?Sized,
    {
        config.validate()?;

        let start = Instant::now();
        debug!(
            "search started: {} variables, {} constraints, mode {:?}",
            csp.variable_count(),
            csp.constraint_count(),
            config.mode
        );

        let mut search = Search {
            checker,
            config,
            cancel,
            start,
            stats: SearchStats::default(),
            solutions: Vec::new(),
        };
        let outcome = search.explore(csp.initial_state())?;

        let mut stats = search.stats;
        stats.elapsed_ms = start.elapsed().as_millis() as u64;
        debug!(
            "search finished: {:?}, {} solutions, {} nodes, {} rejected, {} backtracks",
            outcome,
            search.solutions.len(),
            stats.nodes,
            stats.rejected,
            stats.backtracks
        );

        Ok(SearchResult {
            outcome,
            solutions: search.solutions,
            stats,
        })
    }
}

struct Search<'a, V: Value, C: ?Sized> {
    checker: &'a C,
    config: &'a SearchConfig,
    cancel: Option<Arc<AtomicBool>>,
    start: Instant,
    stats: SearchStats,
    solutions: Vec<Assignment<V>>,
}

impl<V: Value, C: ConsistencyChecker<V> + ?Sized> Search<'_, V, C> {
    fn explore(&mut self, mut root: CspState<V>) -> Result<SearchOutcome> {
        let verbose = self.config.verbose;

        match self.classify(&mut root)? {
            NodeStatus::Rejected => {
                if verbose {
                    info!("REJECTED: root");
                }
                return Ok(SearchOutcome::Exhausted);
            }
            NodeStatus::Solved => {
                self.solutions.push(root.assignment());
                return Ok(SearchOutcome::Solved);
            }
            NodeStatus::Root | NodeStatus::Partial => {}
        }

        let mut stack = vec![Frame::new(root)];
        while let Some(frame) = stack.last_mut() {
            let Some(value) = frame.candidates.next() else {
                stack.pop();
                self.stats.backtracks += 1;
                continue;
            };
            if let Some(outcome) = self.interrupted() {
                return Ok(outcome);
            }

            let mut child = frame.state.clone();
            child.commit(value)?;
            self.stats.nodes += 1;
            self.stats.max_depth = self.stats.max_depth.max(child.depth());

            match self.classify(&mut child)? {
                NodeStatus::Rejected => {
                    if verbose {
                        if let Some(var) = child.current_variable() {
                            info!(
                                "REJECTED: {} = {:?} at depth {}",
                                var.name(),
                                var.assigned_value(),
                                child.depth()
                            );
                        }
                    }
                }
                NodeStatus::Solved => {
                    self.solutions.push(child.assignment());
                    if verbose {
                        info!("SOLVED: solution #{}", self.solutions.len());
                    }
                    if self.config.mode.is_satisfied(self.solutions.len()) {
                        return Ok(SearchOutcome::Solved);
                    }
                }
                NodeStatus::Partial | NodeStatus::Root => stack.push(Frame::new(child)),
            }
        }

        Ok(if self.solutions.is_empty() {
            SearchOutcome::Exhausted
        } else {
            SearchOutcome::Solved
        })
    }

    /// Runs the checker on `state` and places it in the state machine.
    fn classify(&mut self, state: &mut CspState<V>) -> Result<NodeStatus> {
        if !self.checker.check(state, self.config.verbose)? {
            self.stats.rejected += 1;
            return Ok(NodeStatus::Rejected);
        }
        Ok(if state.is_complete() {
            NodeStatus::Solved
        } else if state.depth() == 0 {
            NodeStatus::Root
        } else {
            NodeStatus::Partial
        })
    }

    /// Checks cancellation and budgets before a commit.
    fn interrupted(&self) -> Option<SearchOutcome> {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                debug!("search cancelled after {} nodes", self.stats.nodes);
                return Some(SearchOutcome::Cancelled);
            }
        }
        if self.config.max_nodes > 0 && self.stats.nodes >= self.config.max_nodes {
            debug!("node budget of {} exhausted", self.config.max_nodes);
            return Some(SearchOutcome::BudgetExceeded);
        }
        if self.config.time_limit_ms > 0
            && self.start.elapsed().as_millis() >= u128::from(self.config.time_limit_ms)
        {
            debug!("time budget of {} ms exhausted", self.config.time_limit_ms);
            return Some(SearchOutcome::BudgetExceeded);
        }
        None
    }
}
