//! Single-branch greedy planner.
//!
//! Applies the first candidate in canonical order until no candidate remains.
//! It never backtracks, so it finds one terminal state cheaply but may miss
//! goals that only another branch reaches. Useful as a fast baseline next to
//! [`BreadthFirstPlanner`](crate::search::BreadthFirstPlanner).
//!
//! # Example
//!
//! ```
//! use assembly_plan::greedy::GreedyPlanner;
//! use assembly_types::{Catalog, PlannerConfig, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add_rule("A", ["m", "f"]).unwrap();
//!
//! let mut catalog = Catalog::new();
//! catalog.add_part("front-door", [("A", "m")]).unwrap();
//! catalog.add_part("door-latch", [("A", "f")]).unwrap();
//!
//! let planner = GreedyPlanner::new(&catalog, &registry, PlannerConfig::greedy());
//! let outcome = planner.plan(None).unwrap();
//! assert!(outcome.is_solved());
//! assert_eq!(outcome.first_plan().map(|p| p.len()), Some(1));
//! ```

use std::time::Instant;

use assembly_types::{
    AssemblyResult, Catalog, Goal, PlanOutcome, PlanStatus, PlannerConfig, Registry, SearchStats,
};
use tracing::{debug, info, warn};

use crate::matcher::Matcher;
use crate::state::State;

/// Greedy first-candidate planner.
///
/// The configured node budget is the step limit.
pub struct GreedyPlanner<'a> {
    catalog: &'a Catalog,
    matcher: Matcher<'a>,
    config: PlannerConfig,
}

impl<'a> GreedyPlanner<'a> {
    /// Creates a greedy planner over a catalog and registry.
    #[must_use]
    pub fn new(catalog: &'a Catalog, registry: &'a Registry, config: PlannerConfig) -> Self {
        Self {
            catalog,
            matcher: Matcher::new(catalog, registry),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Follow first candidates from the initial state.
    ///
    /// Without a goal, reaching a terminal state is success. With a goal, the
    /// run stops as soon as the goal holds and reports
    /// [`PlanStatus::NoGoalReached`] if the branch ends first.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or goal is invalid.
    pub fn plan(&self, goal: Option<&Goal>) -> AssemblyResult<PlanOutcome> {
        self.config.validate()?;
        let goal = goal.map(|g| g.resolve(self.catalog)).transpose()?;

        let start_time = Instant::now();
        let deadline = self.config.timeout().map(|timeout| start_time + timeout);
        let mut state = State::initial(self.catalog);
        let mut generated = 0usize;

        info!(
            features = self.catalog.feature_count(),
            step_limit = self.config.max_nodes(),
            "Starting greedy assembly"
        );

        let status = loop {
            if goal.as_ref().is_some_and(|g| g.is_satisfied_by(state.mated())) {
                break PlanStatus::Solved;
            }

            let candidates = self.matcher.candidates(state.mated())?;
            let Some(first) = candidates.first() else {
                break if state.depth() == 0 {
                    PlanStatus::Exhausted
                } else if goal.is_some() {
                    PlanStatus::NoGoalReached
                } else {
                    PlanStatus::Solved
                };
            };

            let over_steps = self
                .config
                .max_nodes()
                .is_some_and(|max| state.depth() >= max);
            let over_time = deadline.is_some_and(|deadline| Instant::now() >= deadline);
            if over_steps || over_time {
                warn!(steps = state.depth(), "Greedy assembly stopped before completion");
                break PlanStatus::BudgetExceeded;
            }

            generated += candidates.len();
            debug!(
                step = state.depth() + 1,
                category = %first.category(),
                options = candidates.len(),
                "Applying first candidate"
            );
            state = state.apply(first)?;
        };

        let plans = match status {
            PlanStatus::Exhausted | PlanStatus::NoGoalReached => Vec::new(),
            PlanStatus::Solved | PlanStatus::BudgetExceeded => vec![state.to_plan()],
        };

        info!(status = %status, steps = state.depth(), "Greedy assembly complete");

        let stats = SearchStats::new("greedy")
            .with_nodes_expanded(state.depth())
            .with_states_generated(generated)
            .with_levels(state.depth())
            .with_terminal_states(usize::from(status == PlanStatus::Solved && goal.is_none()))
            .with_elapsed(start_time.elapsed());
        Ok(PlanOutcome::new(status, plans).with_stats(stats))
    }
}
