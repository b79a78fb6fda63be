//! Mating actions and assembly plans.
//!
//! - [`Action`]: one mating group joined in a single assembly step
//! - [`Plan`]: an ordered sequence of actions
//! - [`ResolvedStep`]: an action expressed as `(part name, category, role)`
//!   entries for presentation
//!
//! # Example
//!
//! ```
//! use assembly_types::{Action, Catalog, Category, Plan};
//!
//! let mut catalog = Catalog::new();
//! let door = catalog.add_part("front-door", [("A", "m")]).unwrap();
//! let latch = catalog.add_part("door-latch", [("A", "f")]).unwrap();
//!
//! let a_m = catalog.feature_at(door, 0).unwrap().id();
//! let a_f = catalog.feature_at(latch, 0).unwrap().id();
//!
//! let plan = Plan::new(vec![Action::new(Category::new("A"), [a_f, a_m])]);
//! assert_eq!(plan.len(), 1);
//!
//! let steps = plan.resolve(&catalog).unwrap();
//! assert_eq!(steps[0].features()[0].part_name, "front-door");
//! ```

use std::fmt;

use hashbrown::HashSet;

use crate::catalog::Catalog;
use crate::error::AssemblyResult;
use crate::feature::{Category, Role};
use crate::ids::FeatureId;

/// A set of distinct features joined in one assembly step.
///
/// Feature ids are kept sorted, so two actions over the same features are
/// equal regardless of construction order, and the derived ordering is the
/// canonical `(part id, feature index)` tie-break.
///
/// # Example
///
/// ```
/// use assembly_types::{Action, Category, FeatureId};
///
/// let a = Action::new(Category::new("A"), [FeatureId::new(5), FeatureId::new(2)]);
/// let b = Action::new(Category::new("A"), [FeatureId::new(2), FeatureId::new(5)]);
/// assert_eq!(a, b);
/// assert_eq!(a.feature_ids(), &[FeatureId::new(2), FeatureId::new(5)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    features: Vec<FeatureId>,
    category: Category,
}

impl Action {
    /// Create an action over `features` for `category`.
    ///
    /// Repeated ids are collapsed.
    #[must_use]
    pub fn new(category: Category, features: impl IntoIterator<Item = FeatureId>) -> Self {
        let mut features: Vec<FeatureId> = features.into_iter().collect();
        features.sort_unstable();
        features.dedup();
        Self { features, category }
    }

    /// Get the category of the mating group.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Get the feature ids in ascending order.
    #[must_use]
    pub fn feature_ids(&self) -> &[FeatureId] {
        &self.features
    }

    /// Check whether the action uses `id`.
    #[must_use]
    pub fn contains(&self, id: FeatureId) -> bool {
        self.features.binary_search(&id).is_ok()
    }

    /// Get the number of features joined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the action joins no feature.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Resolve the action against the catalog for presentation.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownFeature`](crate::AssemblyError::UnknownFeature)
    /// if a feature id does not belong to `catalog`.
    pub fn resolve(&self, catalog: &Catalog) -> AssemblyResult<ResolvedStep> {
        let features = self
            .features
            .iter()
            .map(|id| {
                let feature = catalog.try_feature(*id)?;
                Ok(ResolvedFeature {
                    part_name: catalog.try_part(feature.part())?.name().to_string(),
                    category: feature.category().clone(),
                    role: feature.role().clone(),
                })
            })
            .collect::<AssemblyResult<Vec<_>>>()?;

        Ok(ResolvedStep { features })
    }
}

impl PartialOrd for Action {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Action {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.features
            .cmp(&other.features)
            .then_with(|| self.category.cmp(&other.category))
    }
}

/// A feature of a resolved step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedFeature {
    /// Name of the owning part.
    pub part_name: String,
    /// Connection category.
    pub category: Category,
    /// Role within the category.
    pub role: Role,
}

/// An action resolved to part names, categories and roles.
///
/// Displays as one `part: category-role` line per feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedStep {
    features: Vec<ResolvedFeature>,
}

impl ResolvedStep {
    /// Get the resolved features.
    #[must_use]
    pub fn features(&self) -> &[ResolvedFeature] {
        &self.features
    }

    /// Get the names of the parts joined by this step.
    #[must_use]
    pub fn part_names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.part_name.as_str()).collect()
    }
}

impl fmt::Display for ResolvedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, feature) in self.features.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}: {}-{}",
                feature.part_name, feature.category, feature.role
            )?;
        }
        Ok(())
    }
}

/// An ordered assembly sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    actions: Vec<Action>,
}

impl Plan {
    /// Create a plan from actions in execution order.
    #[must_use]
    pub const fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Get the actions in execution order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Get the number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Collect every feature mated by the plan, ascending.
    #[must_use]
    pub fn mated_features(&self) -> Vec<FeatureId> {
        let mut ids: Vec<FeatureId> = self
            .actions
            .iter()
            .flat_map(|a| a.feature_ids().iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Check whether some feature is used by more than one action.
    #[must_use]
    pub fn has_double_use(&self) -> bool {
        let mut seen = HashSet::new();
        self.actions
            .iter()
            .flat_map(|a| a.feature_ids().iter())
            .any(|id| !seen.insert(*id))
    }

    /// Resolve every action against the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if an action refers to a feature outside `catalog`.
    pub fn resolve(&self, catalog: &Catalog) -> AssemblyResult<Vec<ResolvedStep>> {
        self.actions.iter().map(|a| a.resolve(catalog)).collect()
    }

    /// Render the plan as numbered steps.
    ///
    /// # Errors
    ///
    /// Returns an error if an action refers to a feature outside `catalog`.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::{Action, Catalog, Category, Plan};
    ///
    /// let mut catalog = Catalog::new();
    /// let door = catalog.add_part("front-door", [("C", "f")]).unwrap();
    /// let checker = catalog.add_part("door-checker", [("C", "m")]).unwrap();
    ///
    /// let ids = [door, checker].map(|p| catalog.feature_at(p, 0).unwrap().id());
    /// let plan = Plan::new(vec![Action::new(Category::new("C"), ids)]);
    ///
    /// let text = plan.describe(&catalog).unwrap();
    /// assert!(text.starts_with("[Step 1]"));
    /// assert!(text.contains("front-door: C-f"));
    /// ```
    pub fn describe(&self, catalog: &Catalog) -> AssemblyResult<String> {
        let mut out = String::new();
        for (i, step) in self.resolve(catalog)?.iter().enumerate() {
            out.push_str(&format!("[Step {}]\n{step}\n", i + 1));
        }
        Ok(out)
    }
}

impl From<Vec<Action>> for Plan {
    fn from(actions: Vec<Action>) -> Self {
        Self::new(actions)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<FeatureId> {
        raw.iter().copied().map(FeatureId::new).collect()
    }

    #[test]
    fn test_action_canonical_order() {
        let a = Action::new(Category::new("A"), ids(&[0, 4]));
        let b = Action::new(Category::new("C"), ids(&[0, 7]));
        let c = Action::new(Category::new("B"), ids(&[1, 2, 3]));

        let mut actions = vec![c.clone(), b.clone(), a.clone()];
        actions.sort();
        assert_eq!(actions, vec![a, b, c]);
    }

    #[test]
    fn test_action_contains() {
        let action = Action::new(Category::new("B"), ids(&[9, 1, 5]));
        assert!(action.contains(FeatureId::new(5)));
        assert!(!action.contains(FeatureId::new(4)));
        assert_eq!(action.len(), 3);
    }

    #[test]
    fn test_plan_double_use() {
        let clean = Plan::new(vec![
            Action::new(Category::new("A"), ids(&[0, 1])),
            Action::new(Category::new("C"), ids(&[2, 3])),
        ]);
        assert!(!clean.has_double_use());
        assert_eq!(clean.mated_features(), ids(&[0, 1, 2, 3]));

        let reused = Plan::new(vec![
            Action::new(Category::new("A"), ids(&[0, 1])),
            Action::new(Category::new("A"), ids(&[1, 2])),
        ]);
        assert!(reused.has_double_use());
    }

    #[test]
    fn test_resolve_unknown_feature() {
        let catalog = Catalog::new();
        let plan = Plan::new(vec![Action::new(Category::new("A"), ids(&[0]))]);
        assert!(plan.resolve(&catalog).is_err());
    }

    #[test]
    fn test_resolved_step_display() {
        let mut catalog = Catalog::new();
        let bolt = catalog.add_part("bolt2", [("D", "m")]).unwrap();
        let checker = catalog.add_part("door-checker", [("D", "i")]).unwrap();
        let body = catalog.add_part("body", [("D", "f")]).unwrap();

        let feature_ids = [bolt, checker, body].map(|p| catalog.feature_at(p, 0).unwrap().id());
        let step = Action::new(Category::new("D"), feature_ids)
            .resolve(&catalog)
            .unwrap();

        assert_eq!(
            step.to_string(),
            "bolt2: D-m\ndoor-checker: D-i\nbody: D-f"
        );
        assert_eq!(step.part_names(), vec!["bolt2", "door-checker", "body"]);
    }

    #[test]
    fn test_empty_plan_describe() {
        let plan = Plan::default();
        assert!(plan.is_empty());
        assert_eq!(plan.describe(&Catalog::new()).unwrap(), "");
    }
}
