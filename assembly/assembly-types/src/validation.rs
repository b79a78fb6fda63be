//! Catalog validation against a registry.
//!
//! Unmatched categories are legal input: such features simply never take part
//! in an action. The [`CatalogValidation`] report makes them visible before a
//! search starts.

use crate::feature::{Category, Role};
use crate::ids::FeatureId;

/// Catalog validation result.
///
/// Produced by [`Registry::validate_catalog`](crate::Registry::validate_catalog).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogValidation {
    /// Features whose category has no registered rule.
    pub unruled_features: Vec<FeatureId>,

    /// Features whose role is not required by their category's rule.
    pub stray_role_features: Vec<FeatureId>,

    /// Categories present in the catalog whose rule can never be satisfied,
    /// with the required roles no feature provides.
    pub unsatisfiable_categories: Vec<(Category, Vec<Role>)>,
}

impl CatalogValidation {
    /// Create a new empty validation result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no issue was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unruled_features.is_empty()
            && self.stray_role_features.is_empty()
            && self.unsatisfiable_categories.is_empty()
    }

    /// Get the total number of issues found.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.unruled_features.len()
            + self.stray_role_features.len()
            + self.unsatisfiable_categories.len()
    }

    /// Get a summary of validation issues as a string.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "Catalog is consistent with registry".to_string();
        }

        let mut issues = Vec::new();

        if !self.unruled_features.is_empty() {
            issues.push(format!(
                "{} feature(s) without a rule",
                self.unruled_features.len()
            ));
        }

        if !self.stray_role_features.is_empty() {
            issues.push(format!(
                "{} feature(s) with an unused role",
                self.stray_role_features.len()
            ));
        }

        if !self.unsatisfiable_categories.is_empty() {
            let names: Vec<String> = self
                .unsatisfiable_categories
                .iter()
                .map(|(category, _)| category.to_string())
                .collect();
            issues.push(format!("unsatisfiable categories [{}]", names.join(", ")));
        }

        format!("Validation found issues: {}", issues.join(", "))
    }
}
