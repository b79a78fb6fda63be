//! Goals for goal-directed planning.
//!
//! A [`Goal`] describes which features must be mated for a state to count as a
//! solution. Goals are resolved against a catalog into a [`ResolvedGoal`]
//! predicate over [`MatedSet`]s before the search starts.
//!
//! # Example
//!
//! ```
//! use assembly_types::{Catalog, Goal};
//!
//! let mut catalog = Catalog::new();
//! catalog.add_part("front-door", [("A", "m"), ("C", "f")]).unwrap();
//! catalog.add_part("door-latch", [("A", "f")]).unwrap();
//!
//! let goal = Goal::categories(["A"]);
//! let resolved = goal.resolve(&catalog).unwrap();
//! assert_eq!(resolved.required_count(), 2);
//! ```

use hashbrown::HashSet;

use crate::catalog::Catalog;
use crate::error::{AssemblyError, AssemblyResult};
use crate::feature::Category;
use crate::ids::FeatureId;
use crate::mated::MatedSet;

/// What a solution state must have mated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Goal {
    /// Every listed feature must be mated.
    Features(Vec<FeatureId>),
    /// Every feature of the listed categories must be mated.
    Categories(Vec<Category>),
    /// At least this fraction of all features must be mated (`0 < f <= 1`).
    Fraction(f64),
}

impl Goal {
    /// Goal over explicit feature ids.
    #[must_use]
    pub fn features(ids: impl IntoIterator<Item = FeatureId>) -> Self {
        Self::Features(ids.into_iter().collect())
    }

    /// Goal over whole categories.
    #[must_use]
    pub fn categories<C: Into<Category>>(categories: impl IntoIterator<Item = C>) -> Self {
        Self::Categories(categories.into_iter().map(Into::into).collect())
    }

    /// Goal over a fraction of all features.
    #[must_use]
    pub const fn fraction(fraction: f64) -> Self {
        Self::Fraction(fraction)
    }

    /// Resolve the goal into a predicate over mated sets.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidGoal`] if:
    /// - A feature id is not in the catalog
    /// - A category has no feature in the catalog
    /// - The fraction is not in `(0, 1]`
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::{Catalog, FeatureId, Goal};
    ///
    /// let catalog = Catalog::new();
    /// let goal = Goal::features([FeatureId::new(3)]);
    /// assert!(goal.resolve(&catalog).is_err());
    /// ```
    pub fn resolve(&self, catalog: &Catalog) -> AssemblyResult<ResolvedGoal> {
        let capacity = catalog.feature_count();
        match self {
            Self::Features(ids) => {
                if let Some(missing) = ids.iter().find(|id| catalog.feature(**id).is_none()) {
                    return Err(AssemblyError::invalid_goal(format!(
                        "feature {missing} is not in the catalog"
                    )));
                }
                Ok(ResolvedGoal::Superset(MatedSet::from_ids(
                    capacity,
                    ids.iter().copied(),
                )))
            }
            Self::Categories(categories) => {
                let wanted: HashSet<&Category> = categories.iter().collect();
                if let Some(unknown) = categories
                    .iter()
                    .find(|c| catalog.features_of_category(c).next().is_none())
                {
                    return Err(AssemblyError::invalid_goal(format!(
                        "category '{unknown}' has no features in the catalog"
                    )));
                }
                let ids = catalog
                    .features()
                    .filter(|f| wanted.contains(f.category()))
                    .map(crate::feature::Feature::id);
                Ok(ResolvedGoal::Superset(MatedSet::from_ids(capacity, ids)))
            }
            Self::Fraction(fraction) => {
                if !(*fraction > 0.0 && *fraction <= 1.0) {
                    return Err(AssemblyError::invalid_goal(format!(
                        "fraction {fraction} is outside (0, 1]"
                    )));
                }
                #[allow(
                    clippy::cast_precision_loss,
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss
                )]
                let count = (fraction * capacity as f64).ceil() as usize;
                Ok(ResolvedGoal::AtLeast(count.min(capacity)))
            }
        }
    }
}

/// A goal resolved against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedGoal {
    /// The mated set must contain this set.
    Superset(MatedSet),
    /// The mated set must hold at least this many features.
    AtLeast(usize),
}

impl ResolvedGoal {
    /// Check whether a mated set satisfies the goal.
    #[must_use]
    pub fn is_satisfied_by(&self, mated: &MatedSet) -> bool {
        match self {
            Self::Superset(required) => mated.is_superset(required),
            Self::AtLeast(count) => mated.len() >= *count,
        }
    }

    /// Get the number of features the goal requires.
    #[must_use]
    pub fn required_count(&self) -> usize {
        match self {
            Self::Superset(required) => required.len(),
            Self::AtLeast(count) => *count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add_part("door-latch", [("A", "f"), ("B", "f"), ("E", "m")])
            .unwrap();
        catalog.add_part("front-door", [("A", "m"), ("B", "i")]).unwrap();
        catalog
    }

    #[test]
    fn test_feature_goal() {
        let catalog = catalog();
        let goal = Goal::features([FeatureId::new(0), FeatureId::new(3)])
            .resolve(&catalog)
            .unwrap();

        let partial = MatedSet::from_ids(5, [FeatureId::new(0)]);
        let full = partial.with([FeatureId::new(3), FeatureId::new(1)]);
        assert!(!goal.is_satisfied_by(&partial));
        assert!(goal.is_satisfied_by(&full));
    }

    #[test]
    fn test_category_goal() {
        let catalog = catalog();
        let goal = Goal::categories(["B"]).resolve(&catalog).unwrap();
        assert_eq!(goal.required_count(), 2);

        let mated = MatedSet::from_ids(5, [FeatureId::new(1), FeatureId::new(4)]);
        assert!(goal.is_satisfied_by(&mated));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = Goal::categories(["Z"]).resolve(&catalog());
        assert!(matches!(result, Err(AssemblyError::InvalidGoal(_))));
    }

    #[test]
    fn test_fraction_goal() {
        let catalog = catalog();
        let goal = Goal::fraction(0.5).resolve(&catalog).unwrap();
        assert_eq!(goal, ResolvedGoal::AtLeast(3));

        assert!(Goal::fraction(0.0).resolve(&catalog).is_err());
        assert!(Goal::fraction(1.5).resolve(&catalog).is_err());
        assert!(Goal::fraction(f64::NAN).resolve(&catalog).is_err());
    }

    #[test]
    fn test_empty_feature_goal_always_satisfied() {
        let goal = Goal::features([]).resolve(&catalog()).unwrap();
        assert!(goal.is_satisfied_by(&MatedSet::new(5)));
    }
}
