//! Search configuration.

use crate::error::{CspError, Result};

/// How many solutions the driver collects before stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Stop at the first full assignment.
    #[default]
    FirstSolution,
    /// Enumerate the whole tree.
    AllSolutions,
    /// Stop after this many solutions.
    Limit(usize),
}

impl SearchMode {
    /// Whether `found` solutions are enough to stop.
    pub fn is_satisfied(&self, found: usize) -> bool {
        match *self {
            SearchMode::FirstSolution => found >= 1,
            SearchMode::AllSolutions => false,
            SearchMode::Limit(n) => found >= n,
        }
    }
}

/// Configuration for the backtracking search.
///
/// # Examples
///
/// ```
/// use u_csp::search::{SearchConfig, SearchMode};
///
/// let config = SearchConfig::default()
///     .with_mode(SearchMode::AllSolutions)
///     .with_max_nodes(10_000)
///     .with_time_limit_ms(500)
///     .with_verbose(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Solution collection mode.
    pub mode: SearchMode,

    /// Maximum number of commits (search-tree nodes below the root).
    /// 0 = no limit.
    pub max_nodes: usize,

    /// Wall-clock budget in milliseconds. 0 = no limit.
    pub time_limit_ms: u64,

    /// Trace rejected branches and pruned values at `info` level.
    ///
    /// Never changes the outcome.
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            max_nodes: 0,
            time_limit_ms: 0,
            verbose: false,
        }
    }
}

impl SearchConfig {
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.mode == SearchMode::Limit(0) {
            return Err(CspError::InvalidConfig(
                "solution limit must be positive".into(),
            ));
        }
        Ok(())
    }
}
