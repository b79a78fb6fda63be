//! Configuration for assembly planners.
//!
//! # Example
//!
//! ```
//! use assembly_types::PlannerConfig;
//! use std::time::Duration;
//!
//! let config = PlannerConfig::default()
//!     .with_max_nodes(50_000)
//!     .with_timeout(Duration::from_secs(10))
//!     .with_parallel(true);
//!
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::error::{AssemblyError, AssemblyResult};

/// Default node budget for breadth-first search.
pub const DEFAULT_MAX_NODES: usize = 100_000;

/// Default step limit for the greedy planner.
pub const DEFAULT_GREEDY_STEPS: usize = 10_000;

/// Default minimum frontier size before expansion fans out across threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for breadth-first and greedy planning.
///
/// Controls resource limits and parallel expansion. Budget and deadline
/// checks run between search levels, never in the middle of expanding a
/// state.
///
/// # Example
///
/// ```
/// use assembly_types::PlannerConfig;
///
/// // Deterministic single-threaded run with a small budget
/// let config = PlannerConfig::sequential().with_max_nodes(1_000);
/// assert!(!config.parallel());
/// assert_eq!(config.max_nodes(), Some(1_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Maximum number of states to expand before giving up.
    max_nodes: Option<usize>,
    /// Maximum number of search levels (actions per plan).
    max_levels: Option<usize>,
    /// Maximum wall time before giving up.
    timeout: Option<Duration>,
    /// Whether to expand frontier levels in parallel.
    parallel: bool,
    /// Frontier size at which parallel expansion kicks in.
    parallel_threshold: usize,
}

impl PlannerConfig {
    /// Creates a configuration with default settings.
    ///
    /// Defaults:
    /// - Node budget: 100 000
    /// - No level limit
    /// - No timeout
    /// - Parallel expansion for frontiers of 64 states or more
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_nodes: Some(DEFAULT_MAX_NODES),
            max_levels: None,
            timeout: None,
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Single-threaded configuration.
    #[must_use]
    pub const fn sequential() -> Self {
        Self::new().with_parallel(false)
    }

    /// Configuration for the greedy planner, whose node budget is its step
    /// limit.
    #[must_use]
    pub const fn greedy() -> Self {
        Self::sequential().with_max_nodes(DEFAULT_GREEDY_STEPS)
    }

    /// Sets the maximum number of states to expand.
    #[must_use]
    pub const fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(max);
        self
    }

    /// Removes the node budget.
    #[must_use]
    pub const fn without_max_nodes(mut self) -> Self {
        self.max_nodes = None;
        self
    }

    /// Sets the maximum search depth.
    #[must_use]
    pub const fn with_max_levels(mut self, max: usize) -> Self {
        self.max_levels = Some(max);
        self
    }

    /// Sets the timeout duration.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Removes the timeout.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Sets whether frontier levels are expanded in parallel.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the frontier size at which parallel expansion starts.
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns the node budget, if set.
    #[must_use]
    pub const fn max_nodes(&self) -> Option<usize> {
        self.max_nodes
    }

    /// Returns the level limit, if set.
    #[must_use]
    pub const fn max_levels(&self) -> Option<usize> {
        self.max_levels
    }

    /// Returns the timeout duration, if set.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns whether parallel expansion is enabled.
    #[must_use]
    pub const fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the parallel expansion threshold.
    #[must_use]
    pub const fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Returns `true` if a frontier of `frontier_len` states should be
    /// expanded in parallel.
    #[must_use]
    pub const fn expands_in_parallel(&self, frontier_len: usize) -> bool {
        self.parallel && frontier_len >= self.parallel_threshold
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidConfig`] if a budget, level limit,
    /// timeout or parallel threshold is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::PlannerConfig;
    ///
    /// assert!(PlannerConfig::default().with_max_nodes(0).validate().is_err());
    /// ```
    pub fn validate(&self) -> AssemblyResult<()> {
        if self.max_nodes == Some(0) {
            return Err(AssemblyError::invalid_config("max_nodes must be positive"));
        }
        if self.max_levels == Some(0) {
            return Err(AssemblyError::invalid_config("max_levels must be positive"));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(AssemblyError::invalid_config("timeout must be positive"));
        }
        if self.parallel_threshold == 0 {
            return Err(AssemblyError::invalid_config(
                "parallel_threshold must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.max_nodes(), Some(DEFAULT_MAX_NODES));
        assert_eq!(config.max_levels(), None);
        assert_eq!(config.timeout(), None);
        assert!(config.parallel());
        assert_eq!(config.parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_greedy_preset() {
        let config = PlannerConfig::greedy();
        assert_eq!(config.max_nodes(), Some(DEFAULT_GREEDY_STEPS));
        assert!(!config.parallel());
    }

    #[test]
    fn test_parallel_threshold() {
        let config = PlannerConfig::default().with_parallel_threshold(4);
        assert!(!config.expands_in_parallel(3));
        assert!(config.expands_in_parallel(4));
        assert!(!config.with_parallel(false).expands_in_parallel(100));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        assert!(PlannerConfig::default().with_max_levels(0).validate().is_err());
        assert!(
            PlannerConfig::default()
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
        assert!(
            PlannerConfig::default()
                .with_parallel_threshold(0)
                .validate()
                .is_err()
        );
        assert!(
            PlannerConfig::default()
                .without_max_nodes()
                .without_timeout()
                .validate()
                .is_ok()
        );
    }
}
