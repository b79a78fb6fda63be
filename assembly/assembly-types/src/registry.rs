//! Compatibility rules defining valid mating groups.
//!
//! A [`CompatibilityRule`] names, for one [`Category`], the exact set of roles
//! that must be present together to form a connection. The [`Registry`] holds
//! at most one rule per category and answers whether a group of features is a
//! valid mating group.
//!
//! # Example
//!
//! ```
//! use assembly_types::{Catalog, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add_rule("B", ["m", "i", "f"]).unwrap();
//!
//! let mut catalog = Catalog::new();
//! let bolt = catalog.add_part("bolt1", [("B", "m")]).unwrap();
//! let door = catalog.add_part("front-door", [("B", "i")]).unwrap();
//! let latch = catalog.add_part("door-latch", [("B", "f")]).unwrap();
//!
//! let group = [
//!     catalog.feature_at(bolt, 0).unwrap(),
//!     catalog.feature_at(door, 0).unwrap(),
//!     catalog.feature_at(latch, 0).unwrap(),
//! ];
//! assert!(registry.is_valid_group(&group));
//! assert!(!registry.is_valid_group(&group[..2]));
//! ```

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{AssemblyError, AssemblyResult};
use crate::feature::{Category, Feature, Role};
use crate::validation::CatalogValidation;

/// The roles required to form a mating group of one category.
///
/// Roles keep their declaration order, which the matcher uses as the slot
/// order when enumerating groups. Roles are guaranteed duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompatibilityRule {
    category: Category,
    required_roles: Vec<Role>,
}

impl CompatibilityRule {
    /// Build a rule, rejecting empty or repeated role lists.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::EmptyRule`] if no roles are given and
    /// [`AssemblyError::DuplicateRoleInRule`] if a role is repeated.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::{AssemblyError, CompatibilityRule};
    ///
    /// let rule = CompatibilityRule::new("D", ["m", "i", "f"]).unwrap();
    /// assert_eq!(rule.role_count(), 3);
    ///
    /// let bad = CompatibilityRule::new("D", ["m", "m"]);
    /// assert!(matches!(bad, Err(AssemblyError::DuplicateRoleInRule { .. })));
    /// ```
    pub fn new<I, R>(category: impl Into<Category>, roles: I) -> AssemblyResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        let category = category.into();
        let mut required_roles: Vec<Role> = Vec::new();
        for role in roles {
            let role = role.into();
            if required_roles.contains(&role) {
                return Err(AssemblyError::DuplicateRoleInRule { category, role });
            }
            required_roles.push(role);
        }

        if required_roles.is_empty() {
            return Err(AssemblyError::EmptyRule { category });
        }

        Ok(Self {
            category,
            required_roles,
        })
    }

    /// Get the category this rule governs.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Get the required roles in declaration order.
    #[must_use]
    pub fn required_roles(&self) -> &[Role] {
        &self.required_roles
    }

    /// Get the number of roles (and therefore features) in a group.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.required_roles.len()
    }

    /// Check whether `role` takes part in this rule.
    #[must_use]
    pub fn requires(&self, role: &Role) -> bool {
        self.required_roles.contains(role)
    }

    /// Check that `roles` is exactly the required role set: no missing role,
    /// no extra role, no role twice.
    #[must_use]
    pub fn matches_roles<'a>(&self, roles: impl IntoIterator<Item = &'a Role>) -> bool {
        let mut seen: Vec<&Role> = Vec::with_capacity(self.required_roles.len());
        for role in roles {
            if !self.requires(role) || seen.contains(&role) {
                return false;
            }
            seen.push(role);
        }
        seen.len() == self.required_roles.len()
    }
}

/// Registry of compatibility rules, at most one per category.
///
/// The registry is built once before planning and passed explicitly to the
/// matcher and planners; it is never mutated during a search.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registry {
    rules: HashMap<Category, CompatibilityRule>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the roles required for `category`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `roles` is empty or repeats a role
    /// - A rule for `category` already exists
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::{AssemblyError, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry.add_rule("A", ["m", "f"]).unwrap();
    ///
    /// let again = registry.add_rule("A", ["m", "i"]);
    /// assert!(matches!(again, Err(AssemblyError::DuplicateCategoryRule { .. })));
    /// ```
    pub fn add_rule<I, R>(&mut self, category: impl Into<Category>, roles: I) -> AssemblyResult<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.insert(CompatibilityRule::new(category, roles)?)
    }

    /// Register an already validated rule.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::DuplicateCategoryRule`] if a rule for the same
    /// category already exists.
    pub fn insert(&mut self, rule: CompatibilityRule) -> AssemblyResult<()> {
        if self.rules.contains_key(rule.category()) {
            return Err(AssemblyError::DuplicateCategoryRule {
                category: rule.category().clone(),
            });
        }

        debug!(
            category = %rule.category(),
            roles = rule.role_count(),
            "Registered compatibility rule"
        );
        self.rules.insert(rule.category().clone(), rule);
        Ok(())
    }

    /// Look up the rule for a category.
    #[must_use]
    pub fn rule_for(&self, category: &Category) -> Option<&CompatibilityRule> {
        self.rules.get(category)
    }

    /// Iterate over all rules sorted by category.
    pub fn rules(&self) -> impl Iterator<Item = &CompatibilityRule> {
        let mut rules: Vec<_> = self.rules.values().collect();
        rules.sort_by(|a, b| a.category().cmp(b.category()));
        rules.into_iter()
    }

    /// Get the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check whether `features` form a valid mating group.
    ///
    /// All features must share one category that has a registered rule, and
    /// their roles must equal that rule's required roles exactly.
    #[must_use]
    pub fn is_valid_group(&self, features: &[&Feature]) -> bool {
        self.check_group(features).is_ok()
    }

    /// Strict form of [`is_valid_group`](Self::is_valid_group).
    ///
    /// The same feature listed twice fills its role twice, so it is rejected
    /// like any repeated role.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::CategoryMismatchInGroup`] if the features span
    /// several categories, and [`AssemblyError::InvalidGroup`] if the group is
    /// empty, its category has no rule, or its roles differ from the rule.
    pub fn check_group(&self, features: &[&Feature]) -> AssemblyResult<()> {
        let Some(first) = features.first() else {
            return Err(AssemblyError::InvalidGroup {
                category: Category::new(""),
            });
        };
        let category = first.category();

        if let Some(other) = features.iter().find(|f| f.category() != category) {
            return Err(AssemblyError::CategoryMismatchInGroup {
                expected: category.clone(),
                found: other.category().clone(),
            });
        }

        let valid = self
            .rule_for(category)
            .is_some_and(|rule| rule.matches_roles(features.iter().map(|f| f.role())));

        if valid {
            Ok(())
        } else {
            Err(AssemblyError::InvalidGroup {
                category: category.clone(),
            })
        }
    }

    /// Report catalog features that can never take part in a mating group.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::{Catalog, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry.add_rule("E", ["m", "f"]).unwrap();
    ///
    /// let mut catalog = Catalog::new();
    /// catalog.add_part("door-latch", [("E", "m"), ("Z", "x")]).unwrap();
    ///
    /// let report = registry.validate_catalog(&catalog);
    /// assert_eq!(report.unruled_features.len(), 1);
    /// assert_eq!(report.unsatisfiable_categories.len(), 1);
    /// assert!(!report.is_clean());
    /// ```
    #[must_use]
    pub fn validate_catalog(&self, catalog: &Catalog) -> CatalogValidation {
        let mut report = CatalogValidation::new();
        let mut present: HashMap<&Category, HashSet<&Role>> = HashMap::new();

        for feature in catalog.features() {
            match self.rule_for(feature.category()) {
                None => report.unruled_features.push(feature.id()),
                Some(rule) if !rule.requires(feature.role()) => {
                    report.stray_role_features.push(feature.id());
                }
                Some(_) => {
                    present
                        .entry(feature.category())
                        .or_default()
                        .insert(feature.role());
                }
            }
        }

        for rule in self.rules() {
            let Some(roles) = present.get(rule.category()) else {
                continue;
            };
            let missing: Vec<Role> = rule
                .required_roles()
                .iter()
                .filter(|role| !roles.contains(role))
                .cloned()
                .collect();
            if !missing.is_empty() {
                report
                    .unsatisfiable_categories
                    .push((rule.category().clone(), missing));
            }
        }

        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ids::FeatureId;

    fn catalog_with(features: &[(&str, &str)]) -> Catalog {
        let mut catalog = Catalog::new();
        for (i, feature) in features.iter().enumerate() {
            catalog.add_part(format!("part{i}"), [*feature]).unwrap();
        }
        catalog
    }

    fn group(catalog: &Catalog) -> Vec<&Feature> {
        catalog.features().collect()
    }

    #[test]
    fn test_rule_rejects_duplicate_role() {
        let result = CompatibilityRule::new("B", ["m", "i", "m"]);
        match result {
            Err(AssemblyError::DuplicateRoleInRule { category, role }) => {
                assert_eq!(category.as_str(), "B");
                assert_eq!(role.as_str(), "m");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rule_rejects_empty_roles() {
        let result = CompatibilityRule::new("A", Vec::<&str>::new());
        assert!(matches!(result, Err(AssemblyError::EmptyRule { .. })));
    }

    #[test]
    fn test_registry_rejects_second_rule() {
        let mut registry = Registry::new();
        registry.add_rule("A", ["m", "f"]).unwrap();
        let result = registry.add_rule("A", ["m", "f"]);
        assert!(matches!(
            result,
            Err(AssemblyError::DuplicateCategoryRule { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rule_lookup() {
        let mut registry = Registry::new();
        registry.add_rule("D", ["m", "i", "f"]).unwrap();

        let rule = registry.rule_for(&Category::new("D")).unwrap();
        let roles: Vec<_> = rule.required_roles().iter().map(Role::as_str).collect();
        assert_eq!(roles, vec!["m", "i", "f"]);
        assert!(registry.rule_for(&Category::new("Q")).is_none());
    }

    #[test]
    fn test_rules_sorted_by_category() {
        let mut registry = Registry::new();
        registry.add_rule("C", ["m", "f"]).unwrap();
        registry.add_rule("A", ["m", "f"]).unwrap();
        registry.add_rule("B", ["m", "i", "f"]).unwrap();

        let order: Vec<_> = registry.rules().map(|r| r.category().as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_valid_group_exact_roles() {
        let mut registry = Registry::new();
        registry.add_rule("B", ["m", "i", "f"]).unwrap();

        let catalog = catalog_with(&[("B", "f"), ("B", "m"), ("B", "i")]);
        assert!(registry.is_valid_group(&group(&catalog)));
    }

    #[test]
    fn test_group_missing_role() {
        let mut registry = Registry::new();
        registry.add_rule("B", ["m", "i", "f"]).unwrap();

        let catalog = catalog_with(&[("B", "m"), ("B", "f")]);
        assert!(!registry.is_valid_group(&group(&catalog)));
    }

    #[test]
    fn test_group_extra_role() {
        let mut registry = Registry::new();
        registry.add_rule("A", ["m", "f"]).unwrap();

        let catalog = catalog_with(&[("A", "m"), ("A", "f"), ("A", "i")]);
        assert!(!registry.is_valid_group(&group(&catalog)));
    }

    #[test]
    fn test_group_repeated_role() {
        let mut registry = Registry::new();
        registry.add_rule("A", ["m", "f"]).unwrap();

        let catalog = catalog_with(&[("A", "m"), ("A", "m")]);
        assert!(!registry.is_valid_group(&group(&catalog)));

        let catalog = catalog_with(&[("A", "m"), ("A", "f")]);
        let m = catalog.feature(FeatureId::new(0)).unwrap();
        let f = catalog.feature(FeatureId::new(1)).unwrap();
        assert!(!registry.is_valid_group(&[m, f, m]));
    }

    #[test]
    fn test_group_without_rule() {
        let registry = Registry::new();
        let catalog = catalog_with(&[("A", "m"), ("A", "f")]);
        assert!(!registry.is_valid_group(&group(&catalog)));
    }

    #[test]
    fn test_group_mixed_categories() {
        let mut registry = Registry::new();
        registry.add_rule("A", ["m", "f"]).unwrap();
        registry.add_rule("C", ["m", "f"]).unwrap();

        let catalog = catalog_with(&[("A", "m"), ("C", "f")]);
        let result = registry.check_group(&group(&catalog));
        assert!(matches!(
            result,
            Err(AssemblyError::CategoryMismatchInGroup { .. })
        ));
    }

    #[test]
    fn test_empty_group_invalid() {
        let mut registry = Registry::new();
        registry.add_rule("A", ["m", "f"]).unwrap();
        assert!(!registry.is_valid_group(&[]));
    }

    #[test]
    fn test_validate_catalog_reports() {
        let mut registry = Registry::new();
        registry.add_rule("A", ["m", "f"]).unwrap();
        registry.add_rule("E", ["m", "f"]).unwrap();

        let catalog = catalog_with(&[("A", "m"), ("A", "f"), ("A", "x"), ("E", "m"), ("Q", "m")]);
        let report = registry.validate_catalog(&catalog);

        assert_eq!(report.unruled_features, vec![FeatureId::new(4)]);
        assert_eq!(report.stray_role_features, vec![FeatureId::new(2)]);
        assert_eq!(report.unsatisfiable_categories.len(), 1);
        let (category, missing) = &report.unsatisfiable_categories[0];
        assert_eq!(category.as_str(), "E");
        assert_eq!(missing, &vec![Role::new("f")]);
    }
}
