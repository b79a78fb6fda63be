//! Breadth-first search over assembly states.
//!
//! The search expands the state space level by level. Every state on a level
//! has applied the same number of actions, so the first goal state found is
//! reached by a shortest plan. Children whose mated set was already visited
//! are dropped, so each distinct set of mated features is explored once.
//!
//! Large levels are expanded on the rayon thread pool. Workers only read the
//! visited set as it stood at the start of the level; children are merged
//! back sequentially in frontier order, so parallel and sequential runs
//! return identical outcomes.
//!
//! # Example
//!
//! ```
//! use assembly_plan::search::BreadthFirstPlanner;
//! use assembly_types::{Catalog, Goal, PlannerConfig, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add_rule("A", ["m", "f"]).unwrap();
//! registry.add_rule("C", ["m", "f"]).unwrap();
//!
//! let mut catalog = Catalog::new();
//! catalog.add_part("front-door", [("A", "m"), ("C", "f")]).unwrap();
//! catalog.add_part("door-latch", [("A", "f")]).unwrap();
//! catalog.add_part("door-checker", [("C", "m")]).unwrap();
//!
//! let planner = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::default());
//!
//! // Every distinct fully-assembled end state
//! let outcome = planner.plan_all().unwrap();
//! assert!(outcome.is_solved());
//! assert_eq!(outcome.plans().len(), 1);
//! assert_eq!(outcome.plans()[0].len(), 2);
//!
//! // Shortest plan mating the latch
//! let outcome = planner.plan_to_goal(&Goal::categories(["A"])).unwrap();
//! assert_eq!(outcome.first_plan().map(|p| p.len()), Some(1));
//! ```

use std::time::{Duration, Instant};

use assembly_types::{
    AssemblyResult, Catalog, Goal, MatedSet, Plan, PlanOutcome, PlanStatus, PlannerConfig,
    Registry, ResolvedGoal, SearchStats,
};
use hashbrown::HashSet;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::matcher::Matcher;
use crate::state::State;

/// What expanding one frontier state produced.
struct Expansion {
    /// Number of candidate actions, before duplicate pruning.
    candidates: usize,
    /// Children not in the visited set at the start of the level.
    fresh: Vec<State>,
}

/// Running counters for [`SearchStats`].
#[derive(Default)]
struct Tally {
    nodes_expanded: usize,
    states_generated: usize,
    duplicates_pruned: usize,
    terminal_states: usize,
    levels: usize,
}

impl Tally {
    fn into_stats(self, elapsed: Duration) -> SearchStats {
        SearchStats::new("BFS")
            .with_nodes_expanded(self.nodes_expanded)
            .with_states_generated(self.states_generated)
            .with_duplicates_pruned(self.duplicates_pruned)
            .with_terminal_states(self.terminal_states)
            .with_levels(self.levels)
            .with_elapsed(elapsed)
    }
}

/// Breadth-first assembly planner.
///
/// Runs in one of two modes:
/// - [`plan_all`](Self::plan_all): explores the whole reachable space and
///   returns one plan per distinct terminal state, in discovery order
/// - [`plan_to_goal`](Self::plan_to_goal): stops at the first state that
///   satisfies a [`Goal`] and returns its plan
pub struct BreadthFirstPlanner<'a> {
    catalog: &'a Catalog,
    matcher: Matcher<'a>,
    config: PlannerConfig,
}

impl<'a> BreadthFirstPlanner<'a> {
    /// Creates a planner over a catalog and registry.
    ///
    /// The configuration is validated when a search starts.
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

    /// Explore every reachable state and collect the terminal ones.
    ///
    /// A state is terminal when no candidate action remains. The outcome
    /// holds one plan per distinct terminal mated set.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the search hits an
    /// internal inconsistency.
    pub fn plan_all(&self) -> AssemblyResult<PlanOutcome> {
        self.search(None)
    }

    /// Find a shortest plan to a state satisfying `goal`.
    ///
    /// # Errors
    ///
    /// Returns an error if the goal does not resolve against the catalog or
    /// the configuration is invalid.
    pub fn plan_to_goal(&self, goal: &Goal) -> AssemblyResult<PlanOutcome> {
        let resolved = goal.resolve(self.catalog)?;
        self.search(Some(&resolved))
    }

    /// Run [`plan_to_goal`](Self::plan_to_goal) when a goal is given and
    /// [`plan_all`](Self::plan_all) otherwise.
    ///
    /// # Errors
    ///
    /// See the two modes.
    pub fn plan(&self, goal: Option<&Goal>) -> AssemblyResult<PlanOutcome> {
        match goal {
            Some(goal) => self.plan_to_goal(goal),
            None => self.plan_all(),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn search(&self, goal: Option<&ResolvedGoal>) -> AssemblyResult<PlanOutcome> {
        self.config.validate()?;

        let start_time = Instant::now();
        let deadline = self.config.timeout().map(|timeout| start_time + timeout);
        let mut tally = Tally::default();

        info!(
            parts = self.catalog.part_count(),
            features = self.catalog.feature_count(),
            rules = self.matcher.usable_rule_count(),
            goal_directed = goal.is_some(),
            "Starting breadth-first assembly search"
        );

        let root = State::initial(self.catalog);

        if let Some(goal) = goal
            && goal.is_satisfied_by(root.mated())
        {
            debug!("Goal already satisfied by the initial state");
            return Ok(Self::finish(PlanStatus::Solved, vec![Plan::default()], tally, start_time));
        }

        let mut visited: HashSet<MatedSet> = HashSet::new();
        visited.insert(root.mated().clone());
        let mut frontier = vec![root];
        let mut terminals: Vec<Plan> = Vec::new();

        while !frontier.is_empty() {
            if let Some(reason) = self.limit_reached(&tally, frontier.len(), deadline) {
                warn!(
                    reason,
                    levels = tally.levels,
                    nodes_expanded = tally.nodes_expanded,
                    frontier = frontier.len(),
                    "Search stopped before completion"
                );
                let partial = if goal.is_some() { Vec::new() } else { terminals };
                return Ok(Self::finish(PlanStatus::BudgetExceeded, partial, tally, start_time));
            }

            let expansions = self.expand_level(&frontier, &visited)?;
            tally.nodes_expanded += frontier.len();

            // Children of this level would exceed the level limit.
            let at_level_cap = self
                .config
                .max_levels()
                .is_some_and(|max| tally.levels >= max);
            let mut truncated = false;

            let mut next = Vec::new();
            for (state, expansion) in frontier.iter().zip(expansions) {
                if expansion.candidates == 0 {
                    if tally.levels == 0 {
                        info!("No candidate action in the initial state");
                        return Ok(Self::finish(PlanStatus::Exhausted, Vec::new(), tally, start_time));
                    }
                    tally.terminal_states += 1;
                    if goal.is_none() {
                        terminals.push(state.to_plan());
                    }
                    continue;
                }
                if at_level_cap {
                    truncated = true;
                    continue;
                }

                tally.states_generated += expansion.candidates;
                tally.duplicates_pruned += expansion.candidates - expansion.fresh.len();

                for child in expansion.fresh {
                    if !visited.insert(child.mated().clone()) {
                        tally.duplicates_pruned += 1;
                        continue;
                    }
                    if let Some(goal) = goal
                        && goal.is_satisfied_by(child.mated())
                    {
                        tally.levels += 1;
                        let plan = child.to_plan();
                        info!(
                            steps = plan.len(),
                            nodes_expanded = tally.nodes_expanded,
                            "Goal state reached"
                        );
                        return Ok(Self::finish(PlanStatus::Solved, vec![plan], tally, start_time));
                    }
                    next.push(child);
                }
            }

            if truncated {
                warn!(
                    reason = "level limit",
                    levels = tally.levels,
                    nodes_expanded = tally.nodes_expanded,
                    terminals = tally.terminal_states,
                    "Search stopped before completion"
                );
                let partial = if goal.is_some() { Vec::new() } else { terminals };
                return Ok(Self::finish(PlanStatus::BudgetExceeded, partial, tally, start_time));
            }
            if !next.is_empty() {
                tally.levels += 1;
            }
            debug!(
                level = tally.levels,
                frontier = next.len(),
                visited = visited.len(),
                duplicates_pruned = tally.duplicates_pruned,
                terminals = tally.terminal_states,
                "Level expanded"
            );
            frontier = next;
        }

        let status = if goal.is_some() {
            PlanStatus::NoGoalReached
        } else {
            PlanStatus::Solved
        };
        info!(
            status = %status,
            plans = terminals.len(),
            nodes_expanded = tally.nodes_expanded,
            elapsed = ?start_time.elapsed(),
            "Breadth-first assembly search complete"
        );
        Ok(Self::finish(status, terminals, tally, start_time))
    }

    /// Expand every frontier state against a snapshot of the visited set.
    fn expand_level(
        &self,
        frontier: &[State],
        visited: &HashSet<MatedSet>,
    ) -> AssemblyResult<Vec<Expansion>> {
        if self.config.expands_in_parallel(frontier.len()) {
            frontier
                .par_iter()
                .map(|state| self.expand(state, visited))
                .collect()
        } else {
            frontier
                .iter()
                .map(|state| self.expand(state, visited))
                .collect()
        }
    }

    fn expand(&self, state: &State, visited: &HashSet<MatedSet>) -> AssemblyResult<Expansion> {
        let children = self.matcher.successors(state)?;
        let candidates = children.len();
        let fresh = children
            .into_iter()
            .filter(|child| !visited.contains(child.mated()))
            .collect();
        Ok(Expansion { candidates, fresh })
    }

    /// Check the node budget and deadline before a level.
    ///
    /// The level limit is handled after expansion, so states sitting exactly
    /// at the limit are still recognized as terminal.
    fn limit_reached(
        &self,
        tally: &Tally,
        frontier_len: usize,
        deadline: Option<Instant>,
    ) -> Option<&'static str> {
        if self
            .config
            .max_nodes()
            .is_some_and(|max| tally.nodes_expanded + frontier_len > max)
        {
            return Some("node budget");
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some("timeout");
        }
        None
    }

    fn finish(
        status: PlanStatus,
        plans: Vec<Plan>,
        tally: Tally,
        start_time: Instant,
    ) -> PlanOutcome {
        PlanOutcome::new(status, plans).with_stats(tally.into_stats(start_time.elapsed()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use assembly_types::{AssemblyError, FeatureId};

    fn pair_registry() -> Registry {
        let mut registry = Registry::new();
        registry.add_rule("A", ["m", "f"]).unwrap();
        registry.add_rule("C", ["m", "f"]).unwrap();
        registry
    }

    /// Door with a latch and a checker: two independent pairs.
    fn door_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_part("front-door", [("A", "m"), ("C", "f")]).unwrap();
        catalog.add_part("door-latch", [("A", "f")]).unwrap();
        catalog.add_part("door-checker", [("C", "m")]).unwrap();
        catalog
    }

    /// One male against two females: two different end states.
    fn contested_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_part("front-door", [("A", "m")]).unwrap();
        catalog.add_part("door-latch", [("A", "f")]).unwrap();
        catalog.add_part("spare-latch", [("A", "f")]).unwrap();
        catalog
    }

    #[test]
    fn test_exhaustive_single_terminal() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let planner = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::sequential());

        let outcome = planner.plan_all().unwrap();
        assert_eq!(outcome.status(), PlanStatus::Solved);
        assert_eq!(outcome.plans().len(), 1);

        let plan = &outcome.plans()[0];
        assert_eq!(plan.len(), 2);
        assert!(!plan.has_double_use());
        assert_eq!(plan.mated_features().len(), 4);

        // Both orders reach the same mated set; one is pruned.
        assert_eq!(outcome.stats().duplicates_pruned(), 1);
        assert_eq!(outcome.stats().terminal_states(), 1);
        assert_eq!(outcome.stats().levels(), 2);
        assert_eq!(outcome.stats().algorithm(), "BFS");
    }

    #[test]
    fn test_exhaustive_distinct_terminals() {
        let registry = pair_registry();
        let catalog = contested_catalog();
        let planner = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::sequential());

        let outcome = planner.plan_all().unwrap();
        assert!(outcome.is_solved());
        assert_eq!(outcome.plans().len(), 2);
        assert!(outcome.plans()[0].actions()[0].contains(FeatureId::new(1)));
        assert!(outcome.plans()[1].actions()[0].contains(FeatureId::new(2)));
    }

    #[test]
    fn test_goal_finds_shortest_plan() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let planner = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::sequential());

        let outcome = planner.plan_to_goal(&Goal::categories(["C"])).unwrap();
        assert!(outcome.is_solved());
        let plan = outcome.first_plan().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.actions()[0].category().as_str(), "C");
    }

    #[test]
    fn test_goal_satisfied_at_root() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let planner = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::sequential());

        let outcome = planner.plan_to_goal(&Goal::features([])).unwrap();
        assert!(outcome.is_solved());
        assert_eq!(outcome.first_plan(), Some(&Plan::default()));
    }

    #[test]
    fn test_exhausted_at_root() {
        let registry = pair_registry();
        let mut catalog = Catalog::new();
        catalog.add_part("front-door", [("A", "m")]).unwrap();
        catalog.add_part("door-hinge", [("Z", "m")]).unwrap();

        let planner = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::sequential());
        let outcome = planner.plan_all().unwrap();
        assert_eq!(outcome.status(), PlanStatus::Exhausted);
        assert!(outcome.plans().is_empty());
    }

    #[test]
    fn test_unreachable_goal() {
        let registry = pair_registry();
        let mut catalog = contested_catalog();
        catalog.add_part("door-hinge", [("A", "x")]).unwrap();

        let planner = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::sequential());
        let outcome = planner.plan_to_goal(&Goal::fraction(1.0)).unwrap();
        assert_eq!(outcome.status(), PlanStatus::NoGoalReached);
        assert!(outcome.plans().is_empty());
    }

    #[test]
    fn test_node_budget() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let config = PlannerConfig::sequential().with_max_nodes(2);
        let planner = BreadthFirstPlanner::new(&catalog, &registry, config);

        let outcome = planner.plan_all().unwrap();
        assert_eq!(outcome.status(), PlanStatus::BudgetExceeded);
        assert!(outcome.is_partial());
        assert!(outcome.stats().nodes_expanded() <= 2);
    }

    #[test]
    fn test_level_limit() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let config = PlannerConfig::sequential().with_max_levels(1);
        let planner = BreadthFirstPlanner::new(&catalog, &registry, config);

        let outcome = planner.plan_all().unwrap();
        assert_eq!(outcome.status(), PlanStatus::BudgetExceeded);
        assert_eq!(outcome.stats().levels(), 1);
    }

    #[test]
    fn test_level_limit_allows_full_length_plan() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let config = PlannerConfig::sequential().with_max_levels(2);
        let planner = BreadthFirstPlanner::new(&catalog, &registry, config);

        let outcome = planner.plan_all().unwrap();
        assert_eq!(outcome.status(), PlanStatus::Solved);
        assert_eq!(outcome.plans().len(), 1);
        assert_eq!(outcome.plans()[0].len(), 2);
        assert_eq!(outcome.stats().levels(), 2);
    }

    #[test]
    fn test_level_limit_stops_goal_search() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let config = PlannerConfig::sequential().with_max_levels(1);
        let planner = BreadthFirstPlanner::new(&catalog, &registry, config);

        let outcome = planner.plan_to_goal(&Goal::categories(["A", "C"])).unwrap();
        assert_eq!(outcome.status(), PlanStatus::BudgetExceeded);
        assert!(outcome.plans().is_empty());
    }

    #[test]
    fn test_timeout() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let config = PlannerConfig::sequential().with_timeout(Duration::from_nanos(1));
        let planner = BreadthFirstPlanner::new(&catalog, &registry, config);

        let outcome = planner.plan_all().unwrap();
        assert_eq!(outcome.status(), PlanStatus::BudgetExceeded);
        assert!(outcome.plans().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let config = PlannerConfig::default().with_max_nodes(0);
        let planner = BreadthFirstPlanner::new(&catalog, &registry, config);

        assert!(matches!(planner.plan_all(), Err(AssemblyError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_goal_rejected() {
        let registry = pair_registry();
        let catalog = door_catalog();
        let planner = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::default());

        let result = planner.plan_to_goal(&Goal::categories(["Q"]));
        assert!(matches!(result, Err(AssemblyError::InvalidGoal(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let registry = pair_registry();
        let mut catalog = Catalog::new();
        for i in 0..3 {
            catalog.add_part(format!("door{i}"), [("A", "m"), ("C", "f")]).unwrap();
            catalog.add_part(format!("latch{i}"), [("A", "f")]).unwrap();
            catalog.add_part(format!("checker{i}"), [("C", "m")]).unwrap();
        }

        let sequential = BreadthFirstPlanner::new(&catalog, &registry, PlannerConfig::sequential())
            .plan_all()
            .unwrap();
        let parallel = BreadthFirstPlanner::new(
            &catalog,
            &registry,
            PlannerConfig::default().with_parallel_threshold(1),
        )
        .plan_all()
        .unwrap();

        assert_eq!(sequential.status(), parallel.status());
        assert_eq!(sequential.plans(), parallel.plans());
        assert_eq!(
            sequential.stats().duplicates_pruned(),
            parallel.stats().duplicates_pruned()
        );
    }
}
