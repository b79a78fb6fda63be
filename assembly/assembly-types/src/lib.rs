//! Core types for assembly sequence planning.
//!
//! This crate provides the data model shared by the planners in
//! `assembly-plan`: parts exposing typed mating interfaces, the rules that
//! say which interfaces join together, and the actions and plans a search
//! produces.
//!
//! # Overview
//!
//! - **Catalog**: Parts and their features with dense integer ids
//!   ([`Catalog`], [`Part`], [`Feature`], [`PartId`], [`FeatureId`])
//! - **Rules**: Which roles form a valid mating group per category
//!   ([`CompatibilityRule`], [`Registry`], [`CatalogValidation`])
//! - **Progress**: Which features are mated ([`MatedSet`])
//! - **Goals**: What a solution must have mated ([`Goal`], [`ResolvedGoal`])
//! - **Configuration**: Search budgets and parallelism ([`PlannerConfig`])
//! - **Results**: Actions, plans and outcomes ([`Action`], [`Plan`],
//!   [`PlanOutcome`], [`PlanStatus`], [`SearchStats`])
//!
//! Catalog and registry are built once, then only read. Mating progress lives
//! in [`MatedSet`] values owned by the planner, never on the features.
//!
//! # Example
//!
//! ```
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
//! assert!(registry.validate_catalog(&catalog).is_clean());
//!
//! let goal = Goal::categories(["A"]).resolve(&catalog).unwrap();
//! assert_eq!(goal.required_count(), 2);
//!
//! let config = PlannerConfig::default().with_max_nodes(1_000);
//! assert!(config.validate().is_ok());
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all data types

#![doc(html_root_url = "https://docs.rs/assembly-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod feature;
pub mod goal;
pub mod ids;
pub mod mated;
pub mod outcome;
pub mod part;
pub mod plan;
pub mod registry;
pub mod validation;

// Re-export main types at crate root for convenience
pub use catalog::Catalog;
pub use config::{DEFAULT_GREEDY_STEPS, DEFAULT_MAX_NODES, DEFAULT_PARALLEL_THRESHOLD, PlannerConfig};
pub use error::{AssemblyError, AssemblyResult};
pub use feature::{Category, Feature, Role};
pub use goal::{Goal, ResolvedGoal};
pub use ids::{FeatureId, PartId};
pub use mated::MatedSet;
pub use outcome::{PlanOutcome, PlanStatus, SearchStats};
pub use part::Part;
pub use plan::{Action, Plan, ResolvedFeature, ResolvedStep};
pub use registry::{CompatibilityRule, Registry};
pub use validation::CatalogValidation;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod integration_tests {
    use super::*;

    /// Test that all types can be constructed and used together.
    #[test]
    fn test_full_workflow_types() {
        let mut registry = Registry::new();
        registry.add_rule("B", ["m", "i", "f"]).unwrap();

        let mut catalog = Catalog::new();
        let bolt = catalog.add_part("bolt1", [("B", "m")]).unwrap();
        let door = catalog.add_part("front-door", [("B", "i")]).unwrap();
        let latch = catalog.add_part("door-latch", [("B", "f")]).unwrap();

        let group: Vec<&Feature> = [bolt, door, latch]
            .iter()
            .map(|p| catalog.feature_at(*p, 0).unwrap())
            .collect();
        assert!(registry.is_valid_group(&group));

        let action = Action::new(Category::new("B"), group.iter().map(|f| f.id()));
        let mated = MatedSet::new(catalog.feature_count()).with(action.feature_ids().iter().copied());
        assert_eq!(mated.len(), 3);

        let goal = Goal::fraction(1.0).resolve(&catalog).unwrap();
        assert!(goal.is_satisfied_by(&mated));

        let plan = Plan::new(vec![action]);
        assert!(!plan.has_double_use());
        let text = plan.describe(&catalog).unwrap();
        assert!(text.contains("bolt1: B-m"));

        let outcome = PlanOutcome::new(PlanStatus::Solved, vec![plan])
            .with_stats(SearchStats::new("BFS").with_levels(1));
        assert!(outcome.is_solved());
        assert_eq!(outcome.first_plan().map(Plan::len), Some(1));
    }

    /// Test error types.
    #[test]
    fn test_error_types() {
        let mut registry = Registry::new();
        let error = registry.add_rule("B", ["m", "m"]).unwrap_err();
        assert!(error.is_setup_error());
        assert!(!error.is_invariant_violation());

        let error = AssemblyError::invalid_config("negative timeout");
        assert!(error.to_string().contains("negative timeout"));
    }
}
