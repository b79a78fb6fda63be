//! Error types for assembly planning.
//!
//! This module defines the [`AssemblyError`] enum. Only setup problems
//! (malformed rules, duplicate parts, bad configuration) and internal
//! invariant violations are errors. "No plan" outcomes are reported through
//! [`PlanStatus`](crate::PlanStatus) instead, since failing to find a plan is
//! an expected result of planning.

use crate::feature::{Category, Role};
use crate::ids::{FeatureId, PartId};

/// Result type for assembly planning operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Errors that can occur while building a planning problem or searching it.
///
/// # Example
///
/// ```
/// use assembly_types::{AssemblyError, Category, Role};
///
/// let error = AssemblyError::DuplicateRoleInRule {
///     category: Category::new("B"),
///     role: Role::new("m"),
/// };
///
/// assert!(error.is_setup_error());
/// assert!(error.to_string().contains("duplicate role 'm'"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AssemblyError {
    /// A rule lists the same role more than once.
    #[error("duplicate role '{role}' in rule for category '{category}'")]
    DuplicateRoleInRule {
        /// The category of the offending rule.
        category: Category,
        /// The repeated role.
        role: Role,
    },

    /// A rule for this category is already registered.
    #[error("a rule for category '{category}' is already registered")]
    DuplicateCategoryRule {
        /// The category registered twice.
        category: Category,
    },

    /// A rule has no required roles.
    #[error("rule for category '{category}' has no required roles")]
    EmptyRule {
        /// The category of the empty rule.
        category: Category,
    },

    /// A part with the same name already exists in the catalog.
    #[error("part '{name}' already exists in catalog")]
    DuplicatePart {
        /// The duplicate part name.
        name: String,
    },

    /// The catalog cannot allocate more ids.
    #[error("catalog capacity exceeded")]
    CapacityExceeded,

    /// A feature id does not belong to the catalog.
    #[error("unknown feature {0}")]
    UnknownFeature(FeatureId),

    /// A part id does not belong to the catalog.
    #[error("unknown part {0}")]
    UnknownPart(PartId),

    /// A proposed mating group spans more than one category.
    ///
    /// The matcher never builds such a group; seeing this means a bug in
    /// candidate generation.
    #[error("mating group mixes category '{expected}' with '{found}'")]
    CategoryMismatchInGroup {
        /// Category of the first feature in the group.
        expected: Category,
        /// The first differing category.
        found: Category,
    },

    /// A proposed mating group does not match its category's rule.
    #[error("mating group for category '{category}' does not satisfy its rule")]
    InvalidGroup {
        /// The category of the group.
        category: Category,
    },

    /// An action tried to mate a feature that is already mated.
    #[error("feature {0} is already mated")]
    FeatureAlreadyMated(FeatureId),

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A goal refers to something the catalog does not contain.
    #[error("invalid goal: {0}")]
    InvalidGoal(String),
}

impl AssemblyError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::AssemblyError;
    ///
    /// let error = AssemblyError::invalid_config("max_nodes must be positive");
    /// assert!(error.to_string().contains("max_nodes"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Creates an invalid goal error with the given message.
    #[must_use]
    pub fn invalid_goal(message: impl Into<String>) -> Self {
        Self::InvalidGoal(message.into())
    }

    /// Returns `true` for errors raised while building the catalog, the
    /// registry, the goal or the configuration, before any search runs.
    #[must_use]
    pub const fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRoleInRule { .. }
                | Self::DuplicateCategoryRule { .. }
                | Self::EmptyRule { .. }
                | Self::DuplicatePart { .. }
                | Self::CapacityExceeded
                | Self::InvalidConfig(_)
                | Self::InvalidGoal(_)
        )
    }

    /// Returns `true` for errors that indicate a planner bug rather than bad
    /// input.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::{AssemblyError, Category};
    ///
    /// let error = AssemblyError::CategoryMismatchInGroup {
    ///     expected: Category::new("A"),
    ///     found: Category::new("B"),
    /// };
    /// assert!(error.is_invariant_violation());
    /// assert!(!error.is_setup_error());
    /// ```
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::CategoryMismatchInGroup { .. }
                | Self::InvalidGroup { .. }
                | Self::FeatureAlreadyMated(_)
                | Self::UnknownFeature(_)
                | Self::UnknownPart(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_category_display() {
        let error = AssemblyError::DuplicateCategoryRule {
            category: Category::new("D"),
        };
        let msg = error.to_string();
        assert!(msg.contains("'D'"));
        assert!(msg.contains("already registered"));
    }

    #[test]
    fn test_category_mismatch_display() {
        let error = AssemblyError::CategoryMismatchInGroup {
            expected: Category::new("A"),
            found: Category::new("C"),
        };
        let msg = error.to_string();
        assert!(msg.contains("'A'"));
        assert!(msg.contains("'C'"));
    }

    #[test]
    fn test_error_classification() {
        assert!(AssemblyError::invalid_config("x").is_setup_error());
        assert!(AssemblyError::invalid_goal("x").is_setup_error());
        assert!(
            AssemblyError::DuplicatePart {
                name: "bolt".into()
            }
            .is_setup_error()
        );
        assert!(AssemblyError::FeatureAlreadyMated(FeatureId::new(3)).is_invariant_violation());
        assert!(!AssemblyError::CapacityExceeded.is_invariant_violation());
    }
}
