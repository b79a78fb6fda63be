//! Assembly sequence planning over typed mating features.
//!
//! This crate searches for orderings of mating actions that assemble a set of
//! parts, using the catalog and compatibility rules from `assembly-types`.
//!
//! # Overview
//!
//! - **Matching** ([`matcher::Matcher`]): Every valid group of unmated
//!   features, in canonical order
//! - **States** ([`state::State`]): Immutable mated sets with shared history
//! - **Breadth-first search** ([`search::BreadthFirstPlanner`]): Every
//!   distinct terminal state, or a shortest plan to a goal
//! - **Greedy** ([`greedy::GreedyPlanner`]): One branch, first candidate
//!   each step
//!
//! # Quick Start
//!
//! ```
//! use assembly_plan::plan_assembly;
//! use assembly_types::{Catalog, PlannerConfig, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add_rule("A", ["m", "f"]).unwrap();
//! registry.add_rule("B", ["m", "i", "f"]).unwrap();
//!
//! let mut catalog = Catalog::new();
//! catalog.add_part("door-latch", [("A", "f"), ("B", "f")]).unwrap();
//! catalog.add_part("front-door", [("A", "m"), ("B", "i")]).unwrap();
//! catalog.add_part("bolt1", [("B", "m")]).unwrap();
//!
//! let outcome = plan_assembly(&catalog, &registry, None, PlannerConfig::default()).unwrap();
//! assert!(outcome.is_solved());
//!
//! let plan = outcome.first_plan().unwrap();
//! assert_eq!(plan.len(), 2);
//! println!("{}", plan.describe(&catalog).unwrap());
//! ```
//!
//! # Algorithm Selection
//!
//! | Planner | Finds | Cost |
//! |---------|-------|------|
//! | BFS, no goal | Every distinct terminal state | Whole reachable space |
//! | BFS, goal | A shortest plan to the goal | Levels up to the goal |
//! | Greedy | One terminal state | One candidate scan per step |
//!
//! Both planners only read the catalog and registry, and report "no plan" as
//! a [`PlanStatus`](assembly_types::PlanStatus) rather than an error.

#![doc(html_root_url = "https://docs.rs/assembly-plan/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod greedy;
pub mod matcher;
pub mod search;
pub mod state;

pub use greedy::GreedyPlanner;
pub use matcher::Matcher;
pub use search::BreadthFirstPlanner;
pub use state::{History, State};

use assembly_types::{AssemblyResult, Catalog, Goal, PlanOutcome, PlannerConfig, Registry};

/// Plan an assembly with breadth-first search.
///
/// Without a goal, returns every distinct terminal state. With a goal,
/// returns a shortest plan reaching it.
///
/// # Errors
///
/// Returns an error if the configuration or goal is invalid.
///
/// # Example
///
/// ```
/// use assembly_plan::plan_assembly;
/// use assembly_types::{Catalog, Goal, PlanStatus, PlannerConfig, Registry};
///
/// let mut registry = Registry::new();
/// registry.add_rule("A", ["m", "f"]).unwrap();
///
/// let mut catalog = Catalog::new();
/// catalog.add_part("front-door", [("A", "m")]).unwrap();
/// catalog.add_part("door-hinge", [("H", "m")]).unwrap();
///
/// let goal = Goal::categories(["A"]);
/// let outcome = plan_assembly(&catalog, &registry, Some(&goal), PlannerConfig::default()).unwrap();
/// assert_eq!(outcome.status(), PlanStatus::Exhausted);
/// ```
pub fn plan_assembly(
    catalog: &Catalog,
    registry: &Registry,
    goal: Option<&Goal>,
    config: PlannerConfig,
) -> AssemblyResult<PlanOutcome> {
    BreadthFirstPlanner::new(catalog, registry, config).plan(goal)
}
