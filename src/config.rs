//! Solver configuration

/// The most search-tree nodes allowed to be alive at once
pub const DEFAULT_NODE_BUDGET: usize = 1_000_000;

/// How many node allocations between progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Ceiling on live nodes in the decision tree, root included. Once it's
    /// reached new branches are refused and the verdict can only be SAT or
    /// unknown.
    pub node_budget: usize,

    /// Log a progress line every this many allocations; 0 turns it off
    pub progress_interval: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            node_budget: DEFAULT_NODE_BUDGET,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl SolverConfig {
    pub fn with_node_budget(mut self, node_budget: usize) -> Self {
        self.node_budget = node_budget;
        self
    }

    pub fn with_progress_interval(mut self, progress_interval: usize) -> Self {
        self.progress_interval = progress_interval;
        self
    }
}
