//! Planning outcomes combining plans with status and statistics.
//!
//! "No plan" is an expected result of planning, so every way a search can
//! end is a [`PlanStatus`] inside a [`PlanOutcome`] rather than an error.
//!
//! # Example
//!
//! ```
//! use assembly_types::{Plan, PlanOutcome, PlanStatus, SearchStats};
//!
//! let outcome = PlanOutcome::new(PlanStatus::Solved, vec![Plan::default()])
//!     .with_stats(SearchStats::new("BFS").with_nodes_expanded(1));
//!
//! assert!(outcome.is_solved());
//! assert_eq!(outcome.stats().algorithm(), "BFS");
//! ```

use std::fmt;
use std::time::Duration;

use crate::plan::Plan;

/// How a planning run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanStatus {
    /// One or more complete plans were found.
    Solved,
    /// The initial state has no candidate action at all.
    Exhausted,
    /// The search ran out of states without satisfying the goal.
    NoGoalReached,
    /// The node budget, level limit or deadline stopped the search; any plans
    /// attached are partial results.
    BudgetExceeded,
}

impl PlanStatus {
    /// Returns `true` if the run found what it was asked for.
    #[must_use]
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Solved => "solved",
            Self::Exhausted => "exhausted at root",
            Self::NoGoalReached => "no plan reaches goal",
            Self::BudgetExceeded => "search budget exceeded",
        };
        f.write_str(text)
    }
}

/// Statistics about a planning run.
///
/// # Example
///
/// ```
/// use assembly_types::SearchStats;
/// use std::time::Duration;
///
/// let stats = SearchStats::new("BFS")
///     .with_nodes_expanded(12)
///     .with_levels(4)
///     .with_elapsed(Duration::from_millis(3));
/// assert_eq!(stats.levels(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    algorithm: String,
    nodes_expanded: usize,
    states_generated: usize,
    duplicates_pruned: usize,
    levels: usize,
    terminal_states: usize,
    elapsed: Duration,
}

impl SearchStats {
    /// Creates empty statistics for the named algorithm.
    #[must_use]
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            ..Self::default()
        }
    }

    /// Sets the number of states expanded.
    #[must_use]
    pub const fn with_nodes_expanded(mut self, count: usize) -> Self {
        self.nodes_expanded = count;
        self
    }

    /// Sets the number of child states generated.
    #[must_use]
    pub const fn with_states_generated(mut self, count: usize) -> Self {
        self.states_generated = count;
        self
    }

    /// Sets the number of children dropped as already visited.
    #[must_use]
    pub const fn with_duplicates_pruned(mut self, count: usize) -> Self {
        self.duplicates_pruned = count;
        self
    }

    /// Sets the number of levels explored.
    #[must_use]
    pub const fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Sets the number of terminal states found.
    #[must_use]
    pub const fn with_terminal_states(mut self, count: usize) -> Self {
        self.terminal_states = count;
        self
    }

    /// Sets the time elapsed.
    #[must_use]
    pub const fn with_elapsed(mut self, duration: Duration) -> Self {
        self.elapsed = duration;
        self
    }

    /// Returns the name of the algorithm used.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Returns the number of states expanded.
    #[must_use]
    pub const fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Returns the number of child states generated.
    #[must_use]
    pub const fn states_generated(&self) -> usize {
        self.states_generated
    }

    /// Returns the number of children dropped as already visited.
    #[must_use]
    pub const fn duplicates_pruned(&self) -> usize {
        self.duplicates_pruned
    }

    /// Returns the number of levels explored.
    #[must_use]
    pub const fn levels(&self) -> usize {
        self.levels
    }

    /// Returns the number of terminal states found.
    #[must_use]
    pub const fn terminal_states(&self) -> usize {
        self.terminal_states
    }

    /// Returns the time elapsed.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// The result of a planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanOutcome {
    status: PlanStatus,
    plans: Vec<Plan>,
    stats: SearchStats,
}

impl PlanOutcome {
    /// Creates an outcome with empty statistics.
    #[must_use]
    pub fn new(status: PlanStatus, plans: Vec<Plan>) -> Self {
        Self {
            status,
            plans,
            stats: SearchStats::default(),
        }
    }

    /// Sets the statistics.
    #[must_use]
    pub fn with_stats(mut self, stats: SearchStats) -> Self {
        self.stats = stats;
        self
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> PlanStatus {
        self.status
    }

    /// Returns the plans in discovery order.
    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Consumes the outcome, returning its plans.
    #[must_use]
    pub fn into_plans(self) -> Vec<Plan> {
        self.plans
    }

    /// Returns the first plan found, if any.
    #[must_use]
    pub fn first_plan(&self) -> Option<&Plan> {
        self.plans.first()
    }

    /// Returns the statistics.
    #[must_use]
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Returns `true` if the status is [`PlanStatus::Solved`].
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.status.is_solved()
    }

    /// Returns `true` if the search was cut short and the plans are partial.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self.status, PlanStatus::BudgetExceeded)
    }
}
